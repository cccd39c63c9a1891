use bazaar_app::{
    auth::{PgAuthService, TokenHasher},
    database::{self, Db},
};
use clap::Args;
use sqlx::PgPool;

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }

    pub(crate) async fn db(&self) -> Result<Db, String> {
        self.connect().await.map(Db::new)
    }
}

#[derive(Debug, Args)]
pub(crate) struct AuthArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Server-side key for API token verifiers
    #[arg(long, env = "TOKEN_HMAC_KEY", hide_env_values = true)]
    token_hmac_key: String,
}

impl AuthArgs {
    pub(crate) async fn service(&self) -> Result<PgAuthService, String> {
        let hasher = TokenHasher::new(&self.token_hmac_key)
            .map_err(|error| format!("invalid token HMAC key: {error}"))?;

        Ok(PgAuthService::new(self.database.connect().await?, hasher))
    }
}
