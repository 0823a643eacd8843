use serde_json::Value;

use pregao_core::QuoteService;

use crate::error::CliError;

pub fn run(service: &QuoteService) -> Result<Value, CliError> {
    Ok(serde_json::to_value(service.health())?)
}
