use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Canonical provider identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// brapi.dev, B3 regional specialist. No call quota.
    Brapi,
    /// Twelve Data, general-purpose international coverage. No call quota.
    TwelveData,
    /// Alpha Vantage, broad coverage behind a hard 5-calls-per-minute quota.
    AlphaVantage,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::Brapi, Self::TwelveData, Self::AlphaVantage];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brapi => "brapi",
            Self::TwelveData => "twelvedata",
            Self::AlphaVantage => "alphavantage",
        }
    }

    /// Whether the provider's published quota subjects it to the shared
    /// sliding-window rate limiter.
    pub const fn is_quota_limited(self) -> bool {
        matches!(self, Self::AlphaVantage)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brapi" => Ok(Self::Brapi),
            "twelvedata" => Ok(Self::TwelveData),
            "alphavantage" => Ok(Self::AlphaVantage),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for provider in ProviderId::ALL {
            let parsed = ProviderId::from_str(provider.as_str()).expect("must parse");
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn only_alphavantage_is_quota_limited() {
        assert!(ProviderId::AlphaVantage.is_quota_limited());
        assert!(!ProviderId::Brapi.is_quota_limited());
        assert!(!ProviderId::TwelveData.is_quota_limited());
    }
}
