//! Read-only post projections.
//!
//! Posts are never written by this service; these types shape the joined
//! rows returned by the posts listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::User;

/// Numeric post identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PostId(i32);

impl PostId {
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

/// Numeric member identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemberId(i32);

impl MemberId {
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

/// A vote attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    pub id: i32,
    pub member_id: MemberId,
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i32,
    pub member_id: MemberId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// The member owning a post, joined to its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub id: MemberId,
    pub user: User,
}

/// A post joined with its votes, comments, and owning member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub member: MemberView,
    pub votes: Vec<VoteView>,
    pub comments: Vec<CommentView>,
}
