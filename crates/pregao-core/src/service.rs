//! Service facade: single entry point wiring credentials, adapters, cache,
//! rate limiter and the fallback router together.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use crate::adapters::{AlphaVantageAdapter, BrapiAdapter, TwelveDataAdapter};
use crate::cache::{QuoteCache, DEFAULT_TTL};
use crate::clock::{Clock, SystemClock};
use crate::credentials::ProviderCredentials;
use crate::error::QuoteError;
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::QuoteSource;
use crate::rate_limit::{SlidingWindow, DEFAULT_BUDGET, DEFAULT_WINDOW};
use crate::routing::QuoteRouter;
use crate::{ProviderId, Quote, Symbol};

/// Tunables for one service instance. `Default` matches production use.
#[derive(Debug, Clone)]
pub struct QuoteServiceConfig {
    pub cache_ttl: Duration,
    pub rate_window: Duration,
    pub rate_budget: u32,
    pub http_timeout_ms: u64,
}

impl Default for QuoteServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_TTL,
            rate_window: DEFAULT_WINDOW,
            rate_budget: DEFAULT_BUDGET,
            http_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Point-in-time operational snapshot, serializable for health endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub ready: bool,
    pub providers: Vec<ProviderHealth>,
    pub rate_budget_remaining: u32,
    pub cached_quotes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderHealth {
    pub id: ProviderId,
    pub configured: bool,
}

/// Facade over the whole acquisition pipeline.
pub struct QuoteService {
    router: QuoteRouter,
    cache: Arc<QuoteCache>,
    limiter: Arc<SlidingWindow>,
    configured: Vec<ProviderId>,
}

impl QuoteService {
    /// Production constructor: resolve credentials from the environment and
    /// talk to vendors over HTTP.
    pub fn from_env() -> Self {
        Self::new(ProviderCredentials::from_env(), QuoteServiceConfig::default())
    }

    pub fn new(credentials: ProviderCredentials, config: QuoteServiceConfig) -> Self {
        let http_client: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::with_timeout_ms(config.http_timeout_ms));
        let sources = build_sources(&credentials, http_client);
        Self::with_sources(sources, config, Arc::new(SystemClock))
    }

    /// Assemble the service from pre-built sources and an explicit clock.
    /// This is the seam tests use to run without network or wall time.
    pub fn with_sources(
        sources: Vec<Arc<dyn QuoteSource>>,
        config: QuoteServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = Arc::new(QuoteCache::new(config.cache_ttl, Arc::clone(&clock)));
        let limiter = Arc::new(SlidingWindow::new(
            config.rate_window,
            config.rate_budget,
            clock,
        ));
        let configured = ProviderId::ALL
            .into_iter()
            .filter(|provider| sources.iter().any(|source| source.id() == *provider))
            .collect();
        let router = QuoteRouter::new(sources, Arc::clone(&cache), Arc::clone(&limiter));
        Self {
            router,
            cache,
            limiter,
            configured,
        }
    }

    /// Resolve a single symbol through cache and fallback chain.
    pub async fn get_quote(&self, symbol: &Symbol) -> Result<Quote, QuoteError> {
        self.router.get_quote(symbol, false).await
    }

    /// Resolve many symbols concurrently. Results come back in input order;
    /// any symbol that cannot be resolved fails the whole batch and is named
    /// in the error.
    pub async fn get_quotes(
        &self,
        symbols: &[Symbol],
        force_refresh: bool,
    ) -> Result<Vec<Quote>, QuoteError> {
        let fetches = symbols
            .iter()
            .map(|symbol| self.router.get_quote(symbol, force_refresh));
        let outcomes = join_all(fetches).await;

        let mut quotes = Vec::with_capacity(symbols.len());
        let mut failed: Vec<Symbol> = Vec::new();
        for (symbol, outcome) in symbols.iter().zip(outcomes) {
            match outcome {
                Ok(quote) => quotes.push(quote),
                Err(_) => failed.push(symbol.clone()),
            }
        }

        if failed.is_empty() {
            Ok(quotes)
        } else {
            Err(QuoteError::Batch { failed })
        }
    }

    /// Operational snapshot: configured providers, remaining quota budget
    /// and cache population. Ready means at least one provider can serve.
    pub fn health(&self) -> HealthReport {
        let providers = ProviderId::ALL
            .into_iter()
            .map(|id| ProviderHealth {
                id,
                configured: self.configured.contains(&id),
            })
            .collect();
        HealthReport {
            ready: !self.configured.is_empty(),
            providers,
            rate_budget_remaining: self.limiter.remaining(),
            cached_quotes: self.cache.entry_count(),
        }
    }
}

fn build_sources(
    credentials: &ProviderCredentials,
    http_client: Arc<dyn HttpClient>,
) -> Vec<Arc<dyn QuoteSource>> {
    let mut sources: Vec<Arc<dyn QuoteSource>> = Vec::new();
    if let Some(token) = credentials.get(ProviderId::Brapi) {
        sources.push(Arc::new(BrapiAdapter::new(
            Arc::clone(&http_client),
            token.as_str(),
        )));
    }
    if let Some(key) = credentials.get(ProviderId::TwelveData) {
        sources.push(Arc::new(TwelveDataAdapter::new(
            Arc::clone(&http_client),
            key.as_str(),
        )));
    }
    if let Some(key) = credentials.get(ProviderId::AlphaVantage) {
        sources.push(Arc::new(AlphaVantageAdapter::new(http_client, key.as_str())));
    }
    sources
}
