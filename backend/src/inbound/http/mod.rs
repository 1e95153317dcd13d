//! HTTP inbound adapter exposing the REST endpoints.

pub mod envelope;
pub mod posts;
pub mod state;
pub mod users;

pub use envelope::{ApiResult, Envelope};
pub use state::HttpState;
