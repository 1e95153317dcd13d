//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with the relational
//! store. Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::{PostView, User, UserId, UserProfile};

/// Errors surfaced by [`UserStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// The store could not be reached.
    #[error("failed to reach the user store: {message}")]
    Connection { message: String },

    /// A query failed inside the store.
    #[error("user store query failed: {message}")]
    Query { message: String },

    /// A guarded update matched no row: the record changed identity or
    /// username since it was read.
    #[error("update precondition no longer holds")]
    PreconditionFailed,
}

impl UserStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user records and their companion members.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Whether a user other than `exclude` already holds this username.
    async fn username_taken_by_other(
        &self,
        username: &str,
        exclude: UserId,
    ) -> Result<bool, UserStoreError>;

    /// Whether a user other than `exclude` already holds this email.
    async fn email_taken_by_other(
        &self,
        email: &str,
        exclude: UserId,
    ) -> Result<bool, UserStoreError>;

    /// Create a user row and its companion member row in one transaction.
    ///
    /// Either both rows persist or neither does.
    async fn create_with_member(
        &self,
        profile: &UserProfile,
        password: &str,
    ) -> Result<User, UserStoreError>;

    /// Overwrite a user's profile, guarded on `id` and the username read
    /// earlier.
    ///
    /// Returns [`UserStoreError::PreconditionFailed`] when the guard matches
    /// no row.
    async fn update_profile(
        &self,
        id: UserId,
        expected_username: &str,
        profile: &UserProfile,
    ) -> Result<User, UserStoreError>;
}

/// Errors surfaced by [`PostsQuery`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsQueryError {
    /// The store could not be reached.
    #[error("failed to reach the post store: {message}")]
    Connection { message: String },

    /// A query failed inside the store.
    #[error("post query failed: {message}")]
    Query { message: String },
}

impl PostsQueryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only port for the posts listing.
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts with votes, comments, and owning member joined to its user,
    /// ordered descending by creation timestamp.
    async fn list_recent(&self) -> Result<Vec<PostView>, PostsQueryError>;
}
