//! Fallback orchestration: attempt planning plus the sequential provider
//! loop that accepts the first genuine quote.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::cache::QuoteCache;
use crate::domain::{classify, MarketRegion};
use crate::error::QuoteError;
use crate::provider::{QuoteSource, SourceError};
use crate::rate_limit::SlidingWindow;
use crate::{ProviderId, Quote, Symbol};

/// Ordered provider attempt list for one symbol.
///
/// Priority: the B3 specialist leads for B3 symbols, then the
/// general-purpose provider, then the quota-limited provider, and the B3
/// specialist closes the chain as a last resort for everything else. Only
/// configured providers appear. Admission to the quota-limited provider is
/// decided at invoke time, not here.
pub fn plan_attempts(region: MarketRegion, configured: &[ProviderId]) -> Vec<ProviderId> {
    let has = |provider: ProviderId| configured.contains(&provider);
    let mut plan = Vec::with_capacity(3);

    if region == MarketRegion::B3 && has(ProviderId::Brapi) {
        plan.push(ProviderId::Brapi);
    }
    if has(ProviderId::TwelveData) {
        plan.push(ProviderId::TwelveData);
    }
    if has(ProviderId::AlphaVantage) {
        plan.push(ProviderId::AlphaVantage);
    }
    if has(ProviderId::Brapi) && !plan.contains(&ProviderId::Brapi) {
        plan.push(ProviderId::Brapi);
    }

    plan
}

/// Sequential fallback executor. Owns nothing exclusively: cache and rate
/// limiter are shared with the facade, which reads them for health.
pub struct QuoteRouter {
    sources: HashMap<ProviderId, Arc<dyn QuoteSource>>,
    cache: Arc<QuoteCache>,
    limiter: Arc<SlidingWindow>,
}

impl QuoteRouter {
    pub fn new(
        sources: Vec<Arc<dyn QuoteSource>>,
        cache: Arc<QuoteCache>,
        limiter: Arc<SlidingWindow>,
    ) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.id(), source))
            .collect();
        Self {
            sources,
            cache,
            limiter,
        }
    }

    /// Registered (credential-resolved) providers, in priority-table order.
    pub fn registered(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|provider| self.sources.contains_key(provider))
            .collect()
    }

    /// Resolve one symbol: fresh cache hit, otherwise walk the attempt plan
    /// and accept the first genuine quote, writing it through to the cache.
    pub async fn get_quote(
        &self,
        symbol: &Symbol,
        force_refresh: bool,
    ) -> Result<Quote, QuoteError> {
        if !force_refresh {
            if let Some(quote) = self.cache.get(symbol) {
                debug!("cache hit for '{symbol}'");
                return Ok(quote);
            }
        }

        let region = classify(symbol);
        let plan = plan_attempts(region, &self.registered());
        if plan.is_empty() {
            warn!("no providers configured; failing fast for '{symbol}'");
            return Err(QuoteError::NoRealData {
                symbol: symbol.clone(),
                attempts: 0,
            });
        }

        let mut failures: Vec<SourceError> = Vec::new();
        for provider in plan {
            if provider.is_quota_limited() && !self.limiter.try_acquire() {
                debug!("rate budget spent; skipping '{provider}' for '{symbol}'");
                continue;
            }

            let Some(source) = self.sources.get(&provider) else {
                continue;
            };

            match source.fetch(symbol).await {
                Ok(quote) => {
                    if !failures.is_empty() {
                        debug!(
                            "'{provider}' answered for '{symbol}' after {} failed attempt(s)",
                            failures.len()
                        );
                    }
                    self.cache.put(quote.clone());
                    return Ok(quote);
                }
                Err(error) => {
                    warn!("provider '{provider}' has no quote for '{symbol}': {error}; trying next");
                    failures.push(error);
                }
            }
        }

        Err(QuoteError::NoRealData {
            symbol: symbol.clone(),
            attempts: failures.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b3_symbols_lead_with_the_regional_specialist() {
        let plan = plan_attempts(MarketRegion::B3, &ProviderId::ALL);
        assert_eq!(
            plan,
            vec![
                ProviderId::Brapi,
                ProviderId::TwelveData,
                ProviderId::AlphaVantage
            ]
        );
    }

    #[test]
    fn global_symbols_keep_the_specialist_as_last_resort() {
        let plan = plan_attempts(MarketRegion::Global, &ProviderId::ALL);
        assert_eq!(
            plan,
            vec![
                ProviderId::TwelveData,
                ProviderId::AlphaVantage,
                ProviderId::Brapi
            ]
        );
    }

    #[test]
    fn unconfigured_providers_never_appear() {
        let plan = plan_attempts(
            MarketRegion::B3,
            &[ProviderId::TwelveData, ProviderId::AlphaVantage],
        );
        assert_eq!(plan, vec![ProviderId::TwelveData, ProviderId::AlphaVantage]);
    }

    #[test]
    fn specialist_alone_serves_both_regions() {
        assert_eq!(
            plan_attempts(MarketRegion::B3, &[ProviderId::Brapi]),
            vec![ProviderId::Brapi]
        );
        assert_eq!(
            plan_attempts(MarketRegion::Global, &[ProviderId::Brapi]),
            vec![ProviderId::Brapi]
        );
    }

    #[test]
    fn empty_configuration_yields_an_empty_plan() {
        assert!(plan_attempts(MarketRegion::Global, &[]).is_empty());
    }
}
