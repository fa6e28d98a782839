//! Backend entry-point: wires REST endpoints, persistence and tracing.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use dining_review_backend::inbound::http::health::HealthState;
use dining_review_backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    use diesel::Connection;

    let mut conn = diesel::PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("failed to run migrations: {e}")))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}

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

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let config = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let migration_url = database_url.clone();
            tokio::task::spawn_blocking(move || run_migrations(&migration_url))
                .await
                .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))??;

            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(|e| std::io::Error::other(format!("failed to build pool: {e}")))?;
            ServerConfig::new(bind_addr).with_db_pool(pool)
        }
        Err(_) => {
            warn!("DATABASE_URL not set; serving fixture data only");
            ServerConfig::new(bind_addr)
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(addr = %bind_addr, "server listening");
    server.await
}
