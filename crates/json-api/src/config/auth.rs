//! Auth Config

use clap::Args;

/// API token verification settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Server-side key used to verify API token secrets
    #[arg(long, env = "TOKEN_HMAC_KEY", hide_env_values = true)]
    pub token_hmac_key: String,
}
