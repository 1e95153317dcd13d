//! Backend entry-point: tracing, configuration, migrations, and the HTTP
//! listener.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{run, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_PORT: u16 = 3000;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    run_migrations(&database_url).await?;

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(std::io::Error::other)?;

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    run(ServerConfig::new(bind_addr, pool)).await
}

/// Apply pending migrations before the pool starts serving requests.
///
/// The migration harness is synchronous, so it runs on a blocking thread
/// over an [`AsyncConnectionWrapper`].
async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        Ok(())
    })
    .await
    .map_err(|e| std::io::Error::other(e.to_string()))?
}
