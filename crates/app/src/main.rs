//! Bazaar operator CLI
#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the operator CLI reports results on the terminal"
)]

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
