//! User CRUD sequences over the [`UserStore`] port.
//!
//! Each operation is a single linear pass with early-return branches: shape
//! validation happens in the inbound adapter, conflict and existence checks
//! here, and the store performs the actual writes.

use std::sync::Arc;

use tracing::debug;

use super::ports::{UserStore, UserStoreError};
use super::{password, Error, User, UserId, UserProfile};

/// Application service implementing the user operations.
#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
}

impl UsersService {
    /// Create a service backed by the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user and its companion member record.
    ///
    /// Sequence: username conflict check, email conflict check, then an
    /// atomic insert of both rows with a fresh random password.
    ///
    /// # Errors
    /// - [`Error::username_taken`] when the username exists.
    /// - [`Error::email_in_use`] when the email exists.
    /// - [`Error::server`] for store failures.
    pub async fn create(&self, profile: UserProfile) -> Result<User, Error> {
        if self
            .store
            .find_by_username(&profile.username)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Err(Error::username_taken());
        }

        if self
            .store
            .find_by_email(&profile.email)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Err(Error::email_in_use());
        }

        let generated = password::generate(password::GENERATED_PASSWORD_LENGTH);
        self.store
            .create_with_member(&profile, &generated)
            .await
            .map_err(map_store_error)
    }

    /// Replace a user's profile.
    ///
    /// Conflict checks exclude the user's own row, so resubmitting an
    /// unchanged username or email succeeds. The final write is guarded on
    /// the id and the username read here; a guard miss means the row changed
    /// concurrently and surfaces as a server error rather than a not-found.
    ///
    /// # Errors
    /// - [`Error::user_not_found`] when no user has this id.
    /// - [`Error::username_taken`] / [`Error::email_in_use`] on conflicts
    ///   with other users.
    /// - [`Error::server`] for store failures and guard misses.
    pub async fn update(&self, id: UserId, profile: UserProfile) -> Result<User, Error> {
        let Some(current) = self.store.find_by_id(id).await.map_err(map_store_error)? else {
            return Err(Error::user_not_found());
        };

        if self
            .store
            .username_taken_by_other(&profile.username, id)
            .await
            .map_err(map_store_error)?
        {
            return Err(Error::username_taken());
        }

        if self
            .store
            .email_taken_by_other(&profile.email, id)
            .await
            .map_err(map_store_error)?
        {
            return Err(Error::email_in_use());
        }

        self.store
            .update_profile(id, &current.username, &profile)
            .await
            .map_err(map_store_error)
    }

    /// Fetch a user by exact email.
    ///
    /// # Errors
    /// - [`Error::user_not_found`] when no user has this email.
    /// - [`Error::server`] for store failures.
    pub async fn find_by_email(&self, email: &str) -> Result<User, Error> {
        self.store
            .find_by_email(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(Error::user_not_found)
    }
}

fn map_store_error(error: UserStoreError) -> Error {
    debug!(%error, "user store operation failed");
    match error {
        UserStoreError::PreconditionFailed => {
            Error::server("user row changed while the update was in flight")
        }
        other => Error::server(other.to_string()),
    }
}
