use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "auth_engine_cli", version, about = "Auth Engine administration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Apply embedded database migrations.
    Migrate {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Create an account with staff and superuser flags.
    CreateSuperuser {
        #[command(flatten)]
        db: DbArgs,

        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        /// Account password; subject to the same policy as registration.
        #[arg(long, env = "AUTH_ENGINE_SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Change administrative flags on an existing account.
    SetFlags {
        #[command(flatten)]
        db: DbArgs,

        #[arg(long)]
        email: String,

        #[arg(long)]
        active: Option<bool>,

        #[arg(long)]
        staff: Option<bool>,

        #[arg(long)]
        superuser: Option<bool>,
    },
}
