//! PostgreSQL-backed adapters using Diesel ORM over `diesel-async`.

pub mod diesel_posts_query;
pub mod diesel_user_store;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_posts_query::DieselPostsQuery;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
