use clap::{Parser, Subcommand};

mod args;
mod db;
mod product;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Product(product::ProductCommand),
    Token(token::TokenCommand),

    /// Database maintenance
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
