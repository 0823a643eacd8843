//! brapi.dev adapter for the Brazilian B3 exchange.

use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{FetchFuture, QuoteSource, SourceError};
use crate::{PriceRange, ProviderId, Quote, Symbol, UtcDateTime};

const BASE_URL: &str = "https://brapi.dev/api/quote";

pub struct BrapiAdapter {
    http_client: Arc<dyn HttpClient>,
    token: String,
}

impl BrapiAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, token: impl Into<String>) -> Self {
        Self {
            http_client,
            token: token.into(),
        }
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let id = self.id();

        // brapi expects the bare B3 ticker, without the Yahoo `.SA` suffix.
        let url = format!(
            "{}/{}?token={}",
            BASE_URL,
            urlencoding::encode(symbol.base_ticker()),
            urlencoding::encode(&self.token)
        );

        let response = self
            .http_client
            .execute(HttpRequest::get(url))
            .await
            .map_err(|e| SourceError::transport(id, &e))?;

        if response.status == 429 {
            return Err(SourceError::rate_limited(id, "brapi returned status 429"));
        }
        if !response.is_success() {
            return Err(SourceError::missing_data(
                id,
                format!("brapi returned status {}", response.status),
            ));
        }

        let envelope: BrapiEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(id, format!("brapi payload: {e}")))?;

        if envelope.error.unwrap_or(false) {
            let message = envelope
                .message
                .unwrap_or_else(|| String::from("unspecified brapi error"));
            return Err(SourceError::missing_data(id, message));
        }

        let result = envelope
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::missing_data(id, "empty brapi result set"))?;

        let price = result
            .regular_market_price
            .ok_or_else(|| SourceError::missing_data(id, "brapi result has no price"))?;

        let name = result
            .short_name
            .or(result.long_name)
            .unwrap_or_else(|| symbol.as_str().to_owned());

        Quote::new(
            symbol.clone(),
            name,
            price,
            result.regular_market_change.unwrap_or(0.0),
            result.regular_market_change_percent.unwrap_or(0.0),
            PriceRange::from_vendor(
                result.regular_market_day_low,
                result.regular_market_day_high,
                price,
            ),
            PriceRange::from_vendor(
                result.fifty_two_week_low,
                result.fifty_two_week_high,
                price,
            ),
            result.regular_market_volume.unwrap_or(0),
            result.market_cap,
            result.price_earnings,
            None,
            UtcDateTime::now(),
        )
        .map_err(|e| SourceError::malformed(id, e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct BrapiEnvelope {
    #[serde(default)]
    results: Vec<BrapiResult>,
    error: Option<bool>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrapiResult {
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_change: Option<f64>,
    regular_market_change_percent: Option<f64>,
    regular_market_day_low: Option<f64>,
    regular_market_day_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    fifty_two_week_high: Option<f64>,
    regular_market_volume: Option<u64>,
    market_cap: Option<f64>,
    price_earnings: Option<f64>,
}

impl QuoteSource for BrapiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Brapi
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

    const PETR4_BODY: &str = r#"{
        "results": [{
            "shortName": "PETROBRAS PN",
            "regularMarketPrice": 38.42,
            "regularMarketChange": 0.31,
            "regularMarketChangePercent": 0.81,
            "regularMarketDayLow": 38.01,
            "regularMarketDayHigh": 38.79,
            "fiftyTwoWeekLow": 30.15,
            "fiftyTwoWeekHigh": 42.88,
            "regularMarketVolume": 41250300,
            "marketCap": 498000000000,
            "priceEarnings": 4.1
        }]
    }"#;

    fn adapter(client: Arc<CannedHttpClient>) -> BrapiAdapter {
        BrapiAdapter::new(client, "x9GkT2rP")
    }

    #[tokio::test]
    async fn normalizes_a_b3_quote() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(PETR4_BODY));

        let symbol = Symbol::parse("PETR4.SA").unwrap();
        let quote = adapter(client.clone()).fetch(&symbol).await.expect("quote");

        assert_eq!(quote.symbol.as_str(), "PETR4.SA");
        assert_eq!(quote.name, "PETROBRAS PN");
        assert!((quote.price - 38.42).abs() < 1e-9);
        assert!((quote.day_range.high - 38.79).abs() < 1e-9);
        assert_eq!(quote.volume, 41_250_300);
        assert!(quote.is_real_data);

        // The vendor is called with the bare ticker.
        let urls = client.seen_urls();
        assert!(urls[0].contains("/quote/PETR4?"));
    }

    #[tokio::test]
    async fn empty_result_set_is_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(r#"{"results": []}"#));

        let symbol = Symbol::parse("VALE3").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::MissingData);
    }

    #[tokio::test]
    async fn vendor_error_object_is_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(
            r#"{"results": [], "error": true, "message": "ticker not found"}"#,
        ));

        let symbol = Symbol::parse("XXXX9").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::MissingData);
        assert!(err.message().contains("ticker not found"));
    }

    #[tokio::test]
    async fn missing_price_is_absence() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(
            r#"{"results": [{"shortName": "PETROBRAS PN"}]}"#,
        ));

        let symbol = Symbol::parse("PETR4").unwrap();
        let err = adapter(client).fetch(&symbol).await.expect_err("absent");
        assert_eq!(err.kind(), SourceErrorKind::MissingData);
    }

    #[tokio::test]
    async fn synthesizes_ranges_when_vendor_omits_bounds() {
        let client = Arc::new(CannedHttpClient::new());
        client.push_response(HttpResponse::ok_json(
            r#"{"results": [{"regularMarketPrice": 100.0}]}"#,
        ));

        let symbol = Symbol::parse("SANB11").unwrap();
        let quote = adapter(client).fetch(&symbol).await.expect("quote");
        assert!((quote.year_range.low - 98.0).abs() < 1e-9);
        assert!((quote.year_range.high - 102.0).abs() < 1e-9);
        assert!(quote.is_real_data);
    }
}
