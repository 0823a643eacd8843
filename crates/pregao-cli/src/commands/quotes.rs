use serde::Serialize;
use serde_json::Value;

use pregao_core::{Quote, QuoteService, Symbol};

use crate::cli::QuotesArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct QuotesResponseData {
    quotes: Vec<Quote>,
}

pub async fn run(args: &QuotesArgs, service: &QuoteService) -> Result<Value, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let quotes = service.get_quotes(&symbols, args.refresh).await?;
    Ok(serde_json::to_value(QuotesResponseData { quotes })?)
}
