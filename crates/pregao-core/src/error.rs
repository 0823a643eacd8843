use thiserror::Error;

use crate::Symbol;

/// Validation and contract errors exposed by `pregao-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid provider '{value}', expected one of brapi, twelvedata, alphavantage")]
    InvalidProvider { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("price range low must be <= high")]
    InvalidPriceRange,
}

/// Errors surfaced by the quote service facade. Provider-level absence is
/// never visible here; callers only observe exhausted fallback.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no real market data available for '{symbol}' after {attempts} provider attempt(s)")]
    NoRealData { symbol: Symbol, attempts: usize },

    #[error("batch quote request failed for symbol(s): {}", format_symbols(.failed))]
    Batch { failed: Vec<Symbol> },
}

impl QuoteError {
    /// Symbols that exhausted every provider, empty for non-batch errors.
    pub fn failed_symbols(&self) -> &[Symbol] {
        match self {
            Self::Batch { failed } => failed,
            Self::NoRealData { symbol, .. } => std::slice::from_ref(symbol),
            Self::Validation(_) => &[],
        }
    }
}

fn format_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_error_names_every_failed_symbol() {
        let error = QuoteError::Batch {
            failed: vec![
                Symbol::parse("PETR4.SA").expect("valid symbol"),
                Symbol::parse("VALE3").expect("valid symbol"),
            ],
        };

        let rendered = error.to_string();
        assert!(rendered.contains("PETR4.SA"));
        assert!(rendered.contains("VALE3"));
    }
}
