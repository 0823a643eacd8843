use serde::Serialize;
use serde_json::Value;

use pregao_core::{Quote, QuoteService, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct QuoteResponseData {
    quote: Quote,
}

pub async fn run(args: &QuoteArgs, service: &QuoteService) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let quote = service.get_quote(&symbol).await?;
    Ok(serde_json::to_value(QuoteResponseData { quote })?)
}
