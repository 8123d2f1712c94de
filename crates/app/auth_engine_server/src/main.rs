//! Auth Engine HTTP server binary.
//!
//! Serves the account API over PostgreSQL, or over an in-memory store when
//! started with `--memory-store`.

use std::sync::Arc;

use auth_engine_api::config::ApiConfig;
use auth_engine_core::store::{AccountStore, MemoryAccountStore, PgAccountStore};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "auth_engine_server", about = "Auth Engine API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/auth_engine"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep accounts in memory instead of PostgreSQL. Data is lost on exit.
    #[arg(long, default_value_t = false)]
    memory_store: bool,

    /// Skip running embedded migrations at startup.
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,auth_engine_api=debug,auth_engine_core=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let store: Arc<dyn AccountStore> = if args.memory_store {
        warn!("using in-memory account store; accounts are lost on exit");
        Arc::new(MemoryAccountStore::new())
    } else {
        info!(
            max_connections = args.max_connections,
            "configuring connection pool"
        );
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&args.database_url)
            .await?;

        if args.skip_migrations {
            info!("skipping database migrations");
        } else {
            info!("running database migrations");
            auth_engine_api::migrate(&pool).await?;
        }
        Arc::new(PgAccountStore::new(pool))
    };

    let config = ApiConfig {
        bind_addr: args.bind,
        ..ApiConfig::from_env()
    };

    let state = auth_engine_api::AppState {
        store,
        config: config.clone(),
    };
    let app = auth_engine_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
