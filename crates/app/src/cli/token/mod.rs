use clap::{Args, Subcommand};

mod create;
mod list;
mod revoke;

/// Manage API bearer tokens for users
#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Issue a token and print it once
    Create(create::CreateTokenArgs),

    /// Show token metadata for a user
    List(list::ListTokensArgs),

    /// Revoke a token so it no longer authenticates
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.action {
        TokenAction::Create(args) => create::run(args).await,
        TokenAction::List(args) => list::run(args).await,
        TokenAction::Revoke(args) => revoke::run(args).await,
    }
}
