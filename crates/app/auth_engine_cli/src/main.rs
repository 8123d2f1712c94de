// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use auth_engine_core::models::account::AccountFlags;
use auth_engine_core::store::PgAccountStore;
use clap::Parser;
use cli::{Cli, Commands, DbArgs};
use sqlx::PgPool;

mod cli;
mod commands;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Migrate { db } => block_on(async move {
            let pool = connect(&db).await?;
            auth_engine_core::migrate::migrate(&pool).await?;
            log::info!("migrations applied");
            Ok(())
        })?,
        Commands::CreateSuperuser {
            db,
            email,
            name,
            password,
        } => block_on(async move {
            let store = PgAccountStore::new(connect(&db).await?);
            let account = commands::create_superuser(&store, &email, &name, &password).await?;
            println!("{}", account.id);
            Ok(())
        })?,
        Commands::SetFlags {
            db,
            email,
            active,
            staff,
            superuser,
        } => block_on(async move {
            let store = PgAccountStore::new(connect(&db).await?);
            let flags = AccountFlags {
                is_active: active,
                is_staff: staff,
                is_superuser: superuser,
            };
            commands::set_flags(&store, &email, flags).await?;
            Ok(())
        })?,
    }

    Ok(())
}

/// Run a future to completion on a fresh multi-threaded runtime.
fn block_on<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(future)
}

async fn connect(db: &DbArgs) -> Result<PgPool> {
    Ok(PgPool::connect(&db.database_url).await?)
}
