use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol, uppercase, unique cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        let first = normalized.chars().next().unwrap_or(' ');
        if !first.is_ascii_alphabetic() && first != '^' {
            return Err(ValidationError::SymbolInvalidStart { ch: first });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '^';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker without a Yahoo-style `.SA` exchange suffix. B3 vendors expect
    /// the bare ticker (`PETR4`, not `PETR4.SA`).
    pub fn base_ticker(&self) -> &str {
        self.0.strip_suffix(".SA").unwrap_or(&self.0)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" petr4.sa ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "PETR4.SA");
    }

    #[test]
    fn base_ticker_strips_sa_suffix_only() {
        assert_eq!(Symbol::parse("PETR4.SA").unwrap().base_ticker(), "PETR4");
        assert_eq!(Symbol::parse("BRK-B").unwrap().base_ticker(), "BRK-B");
    }

    #[test]
    fn accepts_index_tickers() {
        let parsed = Symbol::parse("^BVSP").expect("index ticker should parse");
        assert_eq!(parsed.as_str(), "^BVSP");
    }

    #[test]
    fn rejects_invalid_start() {
        let err = Symbol::parse("4PETR").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { .. }));
        // The rendered message must admit both valid leading characters.
        assert!(err.to_string().contains("letter or '^'"));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("PETR4$").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { .. }));
    }
}
