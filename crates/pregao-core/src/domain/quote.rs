use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::{Symbol, UtcDateTime};

/// Width of the synthesized band around price when a vendor omits a range
/// bound. Display placeholder only; does not affect `is_real_data`.
const SYNTHETIC_RANGE_SPREAD: f64 = 0.02;

/// Low/high price band (day range, 52-week range).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Result<Self, ValidationError> {
        validate_non_negative("range.low", low)?;
        validate_non_negative("range.high", high)?;
        if low > high {
            return Err(ValidationError::InvalidPriceRange);
        }
        Ok(Self { low, high })
    }

    /// Narrow band around a price, used when the vendor payload carries no
    /// bounds. The band is a display placeholder; the quote's price itself
    /// is still genuine vendor data.
    pub fn around(price: f64) -> Self {
        Self {
            low: price * (1.0 - SYNTHETIC_RANGE_SPREAD),
            high: price * (1.0 + SYNTHETIC_RANGE_SPREAD),
        }
    }

    /// Build a range from optional vendor bounds, falling back to the
    /// synthesized band for whichever bound is missing.
    pub fn from_vendor(low: Option<f64>, high: Option<f64>, price: f64) -> Self {
        let fallback = Self::around(price);
        let low = low.unwrap_or(fallback.low);
        let high = high.unwrap_or(fallback.high);
        if low > high {
            return fallback;
        }
        Self { low, high }
    }
}

/// Canonical provider-agnostic quote returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub day_range: PriceRange,
    pub year_range: PriceRange,
    pub volume: u64,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub updated_at: UtcDateTime,
    /// True when price/change came from a live vendor response. Quotes with
    /// `false` are never cached and never appear in batch results.
    pub is_real_data: bool,
}

impl Quote {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
        day_range: PriceRange,
        year_range: PriceRange,
        volume: u64,
        market_cap: Option<f64>,
        pe_ratio: Option<f64>,
        dividend_yield: Option<f64>,
        updated_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_finite("change", change)?;
        validate_finite("change_percent", change_percent)?;
        validate_optional_non_negative("market_cap", market_cap)?;
        validate_optional_finite("pe_ratio", pe_ratio)?;
        validate_optional_non_negative("dividend_yield", dividend_yield)?;

        Ok(Self {
            symbol,
            name: name.into(),
            price,
            change,
            change_percent,
            day_range,
            year_range,
            volume,
            market_cap,
            pe_ratio,
            dividend_yield,
            updated_at,
            is_real_data: true,
        })
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_finite(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(value) => validate_finite(field, value),
        None => Ok(()),
    }
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => validate_non_negative(field, value),
        None => Ok(()),
    }
}
