//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostsQuery, UserStore};
use crate::domain::UsersService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UsersService,
    pub posts: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(store: Arc<dyn UserStore>, posts: Arc<dyn PostsQuery>) -> Self {
        Self {
            users: UsersService::new(store),
            posts,
        }
    }
}
