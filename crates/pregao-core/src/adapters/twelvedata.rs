//! Twelve Data adapter, general-purpose international coverage.
//!
//! The vendor serializes every numeric field as a JSON string and reports
//! errors in-band as `{"code": ..., "status": "error"}` with HTTP 200.

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchFuture, QuoteSource, SourceError};
use crate::{PriceRange, ProviderId, Quote, Symbol, UtcDateTime};

const BASE_URL: &str = "https://api.twelvedata.com/quote";

pub struct TwelveDataAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
}

impl TwelveDataAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let id = self.id();

        let url = format!(
            "{}?symbol={}&apikey={}",
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
                format!("twelvedata returned status {}", response.status),
            ));
        }

        let payload: TwelveDataPayload = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(id, format!("twelvedata payload: {e}")))?;

        if payload.status.as_deref() == Some("error") {
            let message = payload
                .message
                .unwrap_or_else(|| String::from("unspecified twelvedata error"));
            return match payload.code {
                Some(429) => Err(SourceError::rate_limited(id, message)),
                _ => Err(SourceError::missing_data(id, message)),
            };
        }

        let price = payload
            .close
            .as_deref()
            .and_then(parse_number)
            .ok_or_else(|| SourceError::missing_data(id, "twelvedata quote has no close price"))?;

        let year_range = payload.fifty_two_week.as_ref().map_or_else(
            || PriceRange::around(price),
            |week| {
                PriceRange::from_vendor(
                    week.low.as_deref().and_then(parse_number),
                    week.high.as_deref().and_then(parse_number),
                    price,
                )
            },
        );

        let name = payload
            .name
            .unwrap_or_else(|| symbol.as_str().to_owned());

        Quote::new(
            symbol.clone(),
            name,
            price,
            payload.change.as_deref().and_then(parse_number).unwrap_or(0.0),
            payload
                .percent_change
                .as_deref()
                .and_then(parse_number)
                .unwrap_or(0.0),
            PriceRange::from_vendor(
                payload.low.as_deref().and_then(parse_number),
                payload.high.as_deref().and_then(parse_number),
                price,
            ),
            year_range,
            payload
                .volume
                .as_deref()
                .and_then(parse_number)
                .map(|v| v.max(0.0) as u64)
                .unwrap_or(0),
            None,
            None,
            None,
            UtcDateTime::now(),
        )
        .map_err(|e| SourceError::malformed(id, e.to_string()))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
struct TwelveDataPayload {
    name: Option<String>,
    close: Option<String>,
    change: Option<String>,
    percent_change: Option<String>,
    high: Option<String>,
    low: Option<String>,
    volume: Option<String>,
    fifty_two_week: Option<FiftyTwoWeek>,
    // In-band error envelope.
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FiftyTwoWeek {
    low: Option<String>,
    high: Option<String>,
}

impl QuoteSource for TwelveDataAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::TwelveData
    }

    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> FetchFuture<'a> {
        Box::pin(self.fetch_quote(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{CannedHttpClient, HttpResponse};
    use crate::provider::SourceErrorKind;

    const AAPL_BODY: &str = r#"{
        "symbol": "AAPL",
        "name": "Apple Inc",
        "close": "232.47",
        "change": "-1.05",
        "percent_change": "-0.45",
        "high": "234.20",
        "low": "231.10",
        "volume": "51230400",
        "fifty_two_week": {"low": "164.08", "high": "260.10"}
    }"#;

    fn adapter(client: Arc<CannedHttpClient>) -> TwelveDataAdapter {
        TwelveDataAdapter::new(client, "k4JrW8nQ")
    }

    #[tokio::test]
    async fn parses_string_encoded_numbers() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(AAPL_BODY));

        let symbol = Symbol::parse("AAPL").unwrap();
        let quote = adapter(client).fetch(&symbol).await.expect("quote");

        assert_eq!(quote.name, "Apple Inc");
        assert!((quote.price - 232.47).abs() < 1e-9);
        assert!((quote.change + 1.05).abs() < 1e-9);
        assert_eq!(quote.volume, 51_230_400);
        assert!((quote.year_range.high - 260.10).abs() < 1e-9);
        assert!(quote.is_real_data);
    }

    #[tokio::test]
    async fn in_band_quota_error_is_rate_limited_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(
            r#"{"code": 429, "message": "You have run out of API credits", "status": "error"}"#,
        ));

        let symbol = Symbol::parse("MSFT").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::RateLimited);
    }

    #[tokio::test]
    async fn unknown_symbol_error_is_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(
            r#"{"code": 400, "message": "symbol not found", "status": "error"}"#,
        ));

        let symbol = Symbol::parse("ZZZZ").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::MissingData);
    }

    #[tokio::test]
    async fn unparsable_close_is_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(r#"{"close": "n/a"}"#));

        let symbol = Symbol::parse("AAPL").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::MissingData);
    }
}
