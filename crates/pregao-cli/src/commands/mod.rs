mod health;
mod quote;
mod quotes;

use serde_json::Value;

use pregao_core::{ProviderCredentials, QuoteService, QuoteServiceConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = QuoteServiceConfig {
        http_timeout_ms: cli.timeout_ms,
        ..QuoteServiceConfig::default()
    };
    let service = QuoteService::new(ProviderCredentials::from_env(), config);

    match &cli.command {
        Command::Quote(args) => quote::run(args, &service).await,
        Command::Quotes(args) => quotes::run(args, &service).await,
        Command::Health => health::run(&service),
    }
}
