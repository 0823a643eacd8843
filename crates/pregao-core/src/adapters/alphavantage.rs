//! Alpha Vantage adapter, broad coverage behind a hard per-minute quota.
//!
//! The `GLOBAL_QUOTE` function carries no display name and no 52-week
//! bounds; the name falls back to the ticker and both ranges are synthesized
//! from price. When the free-tier quota is spent the vendor answers 200 with
//! a `Note`/`Information` field instead of a quote.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchFuture, QuoteSource, SourceError};
use crate::{PriceRange, ProviderId, Quote, Symbol, UtcDateTime};

const BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let id = self.id();

        let url = format!(
            "{}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            BASE_URL,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(&self.api_key)
        );

        let response = self
            .http_client
            .execute(HttpRequest::get(url))
            .await
            .map_err(|e| SourceError::transport(id, &e))?;

        if !response.is_success() {
            return Err(SourceError::missing_data(
                id,
                format!("alphavantage returned status {}", response.status),
            ));
        }

        let envelope: GlobalQuoteEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(id, format!("alphavantage payload: {e}")))?;

        // Quota exhaustion and key problems arrive as prose fields, not as
        // an HTTP status.
        if let Some(note) = envelope.note.or(envelope.information) {
            return Err(SourceError::rate_limited(id, note));
        }
        if let Some(message) = envelope.error_message {
            return Err(SourceError::missing_data(id, message));
        }

        let fields = envelope
            .global_quote
            .filter(|fields| !fields.is_empty())
            .ok_or_else(|| SourceError::missing_data(id, "empty alphavantage global quote"))?;

        let price = fields
            .number("05. price")
            .ok_or_else(|| SourceError::missing_data(id, "alphavantage quote has no price"))?;

        let day_range =
            PriceRange::from_vendor(fields.number("04. low"), fields.number("03. high"), price);

        Quote::new(
            symbol.clone(),
            symbol.as_str(),
            price,
            fields.number("09. change").unwrap_or(0.0),
            fields.percent("10. change percent").unwrap_or(0.0),
            day_range,
            PriceRange::around(price),
            fields.number("06. volume").map(|v| v.max(0.0) as u64).unwrap_or(0),
            None,
            None,
            None,
            UtcDateTime::now(),
        )
        .map_err(|e| SourceError::malformed(id, e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteEnvelope {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuoteFields>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

/// Numbered-key map (`"05. price"`, `"06. volume"`, ...) as the vendor
/// serializes it.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct GlobalQuoteFields(HashMap<String, String>);

impl GlobalQuoteFields {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn percent(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)?
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

impl QuoteSource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::AlphaVantage
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> FetchFuture<'a> {
        Box::pin(self.fetch_quote(symbol))
    }
}
