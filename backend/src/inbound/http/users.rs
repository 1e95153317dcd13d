//! User endpoint handlers.
//!
//! ```text
//! POST /users {"username":"alice","email":"a@x.com","firstName":"A","lastName":"L"}
//! PATCH /users/7 {same shape}
//! GET /users?email=a@x.com
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{Error, ProfileDraft, UserId};
use crate::inbound::http::{ApiResult, Envelope, HttpState};

/// Request body for `POST /users` and `PATCH /users/{userId}`.
///
/// All fields are optional at the parse step so the validation pass can
/// report every missing field instead of failing on the first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserPayload> for ProfileDraft {
    fn from(value: UserPayload) -> Self {
        Self {
            username: value.username,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Create a user and its companion member record.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let profile = ProfileDraft::from(payload.into_inner()).into_profile()?;
    let user = state.users.create(profile).await?;
    Ok(HttpResponse::Created().json(Envelope::success(user)))
}

/// Replace a user's profile.
#[patch("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let profile = ProfileDraft::from(payload.into_inner()).into_profile()?;
    let user = state
        .users
        .update(UserId::new(path.into_inner()), profile)
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::success(user)))
}

/// Query string for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct FindUserQuery {
    pub email: Option<String>,
}

/// Fetch a user by exact email.
#[get("/users")]
pub async fn find_user(
    state: web::Data<HttpState>,
    query: web::Query<FindUserQuery>,
) -> ApiResult<HttpResponse> {
    let Some(email) = query.into_inner().email else {
        return Err(Error::client("email query parameter is required"));
    };
    let user = state.users.find_by_email(&email).await?;
    Ok(HttpResponse::Ok().json(Envelope::success(user)))
}
