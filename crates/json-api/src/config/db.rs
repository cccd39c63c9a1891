//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(
        long,
        env = "DATABASE_MAX_CONNECTIONS",
        default_value_t = bazaar_app::database::DEFAULT_MAX_CONNECTIONS
    )]
    pub max_connections: u32,
}
