mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    log::debug!("dispatching {:?}", cli.command);

    let value = commands::run(&cli).await?;
    output::render(&value, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
