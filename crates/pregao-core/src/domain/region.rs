use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Market region a ticker belongs to, used only for provider attempt ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegion {
    /// Brazilian B3 exchange ticker.
    B3,
    /// Everything else.
    Global,
}

impl MarketRegion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B3 => "b3",
            Self::Global => "global",
        }
    }
}

/// Classify a ticker by exchange convention. B3 tickers either carry the
/// Yahoo-style `.SA` suffix or follow the bare B3 shape: four letters
/// followed by one or two digits (`PETR4`, `VALE3`, `PETR4F`, `SANB11`).
pub fn classify(symbol: &Symbol) -> MarketRegion {
    let raw = symbol.as_str();

    if raw.ends_with(".SA") {
        return MarketRegion::B3;
    }

    if is_bare_b3_ticker(raw) {
        return MarketRegion::B3;
    }

    MarketRegion::Global
}

fn is_bare_b3_ticker(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() < 5 || bytes.len() > 7 {
        return false;
    }

    let (letters, rest) = bytes.split_at(4);
    if !letters.iter().all(u8::is_ascii_uppercase) {
        return false;
    }

    // One or two digits, optionally a fractional-lot 'F' marker.
    let rest = rest.strip_suffix(b"F").unwrap_or(rest);
    !rest.is_empty() && rest.len() <= 2 && rest.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn sa_suffix_is_b3() {
        assert_eq!(classify(&sym("PETR4.SA")), MarketRegion::B3);
    }

    #[test]
    fn bare_b3_pattern_is_b3() {
        assert_eq!(classify(&sym("PETR4")), MarketRegion::B3);
        assert_eq!(classify(&sym("SANB11")), MarketRegion::B3);
        assert_eq!(classify(&sym("VALE3F")), MarketRegion::B3);
    }

    #[test]
    fn us_tickers_are_global() {
        assert_eq!(classify(&sym("AAPL")), MarketRegion::Global);
        assert_eq!(classify(&sym("MSFT")), MarketRegion::Global);
        assert_eq!(classify(&sym("BRK-B")), MarketRegion::Global);
    }

    #[test]
    fn short_tickers_are_global() {
        // Too short for the B3 letters+digits shape.
        assert_eq!(classify(&sym("F")), MarketRegion::Global);
        assert_eq!(classify(&sym("GE4")), MarketRegion::Global);
    }
}
