//! Backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds transport-agnostic
//! types, the user service, and ports; `inbound` adapts HTTP requests onto
//! the domain; `outbound` implements the ports against PostgreSQL.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
