//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::inbound::http::posts::list_posts;
use crate::inbound::http::users::{create_user, find_user, update_user};
use crate::inbound::http::{envelope, HttpState};
use crate::middleware::Trace;
use crate::outbound::persistence::{DieselPostsQuery, DieselUserStore};

/// Register the REST routes, shared state, and extractor configuration.
///
/// Kept separate from [`run`] so tests can assemble the same app against
/// stub ports.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    cfg.app_data(state)
        .app_data(envelope::json_config())
        .service(create_user)
        .service(update_user)
        .service(find_user)
        .service(list_posts);
}

/// Bind the listener and serve until shutdown.
///
/// # Errors
/// Returns the bind error when the address is unavailable.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let pool = config.db_pool().clone();
    let state = web::Data::new(HttpState::new(
        Arc::new(DieselUserStore::new(pool.clone())),
        Arc::new(DieselPostsQuery::new(pool)),
    ));

    let bind_addr = config.bind_addr();
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Trace)
            .configure(|cfg| configure_app(cfg, state))
    })
    .bind(bind_addr)?;

    info!(port = bind_addr.port(), "server running");
    server.run().await
}
