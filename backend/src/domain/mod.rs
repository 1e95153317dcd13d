//! Domain layer: transport-agnostic types, validation, and ports.
//!
//! Inbound adapters translate requests into these types and map the error
//! taxonomy onto their own envelopes; outbound adapters implement the port
//! traits in [`ports`].

pub mod error;
pub mod password;
pub mod ports;
pub mod post;
pub mod user;
pub mod users_service;

pub use error::{Error, ErrorKind};
pub use post::{CommentView, MemberId, MemberView, PostId, PostView, VoteView};
pub use user::{ProfileDraft, User, UserId, UserProfile};
pub use users_service::UsersService;
