//! User identity types and profile validation.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Numeric user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public projection of a user record.
///
/// Never carries the stored password; adapters can serialize this type
/// directly into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Validated profile fields accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Unvalidated profile fields as they arrive from a request body.
///
/// A field that is present but empty counts as present; only absence fails
/// validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileDraft {
    /// Validate the draft, listing every missing field in the error details.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming all absent fields when any of the
    /// four required fields is missing.
    pub fn into_profile(self) -> Result<UserProfile, Error> {
        let missing: Vec<&str> = [
            ("username", self.username.is_none()),
            ("email", self.email.is_none()),
            ("firstName", self.first_name.is_none()),
            ("lastName", self.last_name.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if let (Some(username), Some(email), Some(first_name), Some(last_name)) =
            (self.username, self.email, self.first_name, self.last_name)
        {
            Ok(UserProfile {
                username,
                email,
                first_name,
                last_name,
            })
        } else {
            Err(Error::validation("required field missing")
                .with_details(json!({ "missingFields": missing })))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Required-field validation coverage.
    use super::*;
    use crate::domain::ErrorKind;
    use rstest::rstest;

    fn full_draft() -> ProfileDraft {
        ProfileDraft {
            username: Some("alice".to_owned()),
            email: Some("a@x.com".to_owned()),
            first_name: Some("A".to_owned()),
            last_name: Some("L".to_owned()),
        }
    }

    #[rstest]
    fn complete_draft_validates() {
        let profile = full_draft().into_profile().expect("valid profile");
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.email, "a@x.com");
    }

    #[rstest]
    fn missing_field_is_rejected_and_named() {
        let mut draft = full_draft();
        draft.last_name = None;

        let err = draft.into_profile().expect_err("missing field");
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        let details = err.details().expect("details");
        assert_eq!(details["missingFields"], serde_json::json!(["lastName"]));
    }

    #[rstest]
    fn all_missing_fields_are_listed() {
        let err = ProfileDraft::default()
            .into_profile()
            .expect_err("empty draft");
        let details = err.details().expect("details");
        assert_eq!(
            details["missingFields"],
            serde_json::json!(["username", "email", "firstName", "lastName"])
        );
    }

    #[rstest]
    fn empty_string_counts_as_present() {
        let mut draft = full_draft();
        draft.first_name = Some(String::new());

        let profile = draft.into_profile().expect("empty string is present");
        assert_eq!(profile.first_name, "");
    }

    #[rstest]
    fn user_serializes_without_password_key() {
        let user = User {
            id: UserId::new(7),
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
            first_name: "A".to_owned(),
            last_name: "L".to_owned(),
        };

        let value = serde_json::to_value(&user).expect("serialize user");
        assert_eq!(value["firstName"], "A");
        assert!(value.get("password").is_none());
    }
}
