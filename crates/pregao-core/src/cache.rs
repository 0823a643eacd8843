//! TTL-bounded in-memory quote cache.
//!
//! An entry is written only on a successful real-data fetch and is served
//! only while younger than the TTL. A stale entry reads the same as a miss
//! and stays in the map until the next successful fetch overwrites it; there
//! is no eviction sweep. The symbol universe is small and finite in
//! practice, so growth stays bounded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::warn;

use crate::clock::Clock;
use crate::{Quote, Symbol};

/// Default freshness window for a cached quote.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: Quote,
    fetched_at: Instant,
}

/// Keyed TTL store: symbol -> (last known good quote, fetch instant).
pub struct QuoteCache {
    entries: Mutex<HashMap<Symbol, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QuoteCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Fresh entry or nothing. Stale entries are ignored, not removed.
    pub fn get(&self, symbol: &Symbol) -> Option<Quote> {
        let entries = self.entries.lock().expect("cache lock is not poisoned");
        let entry = entries.get(symbol)?;

        let age = self.clock.now().saturating_duration_since(entry.fetched_at);
        if age > self.ttl {
            return None;
        }
        Some(entry.quote.clone())
    }

    /// Store a quote, overwriting any previous entry for the symbol. Only
    /// genuine quotes are cacheable; a non-real quote is refused.
    pub fn put(&self, quote: Quote) {
        if !quote.is_real_data {
            warn!(
                "refusing to cache non-real quote for '{}'",
                quote.symbol.as_str()
            );
            return;
        }

        let fetched_at = self.clock.now();
        let mut entries = self.entries.lock().expect("cache lock is not poisoned");
        entries.insert(quote.symbol.clone(), CacheEntry { quote, fetched_at });
    }

    /// Number of stored entries, stale ones included. Health reporting only.
    pub fn entry_count(&self) -> usize {
        self.entries
            .lock()
            .expect("cache lock is not poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::{PriceRange, UtcDateTime};

    fn test_quote(symbol: &str) -> Quote {
        Quote::new(
            Symbol::parse(symbol).expect("valid symbol"),
            symbol,
            100.0,
            1.0,
            1.0,
            PriceRange::around(100.0),
            PriceRange::around(100.0),
            1_000,
            None,
            None,
            None,
            UtcDateTime::now(),
        )
        .expect("valid quote")
    }

    #[test]
    fn serves_fresh_entries() {
        let clock = Arc::new(ManualClock::new());
        let cache = QuoteCache::new(DEFAULT_TTL, clock.clone());

        cache.put(test_quote("PETR4.SA"));
        clock.advance(Duration::from_secs(59));

        let hit = cache.get(&Symbol::parse("PETR4.SA").unwrap());
        assert!(hit.is_some());
    }

    #[test]
    fn stale_entry_reads_as_miss_but_is_not_purged() {
        let clock = Arc::new(ManualClock::new());
        let cache = QuoteCache::new(DEFAULT_TTL, clock.clone());

        cache.put(test_quote("PETR4.SA"));
        clock.advance(Duration::from_secs(61));

        assert!(cache.get(&Symbol::parse("PETR4.SA").unwrap()).is_none());
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn entry_exactly_at_ttl_is_still_fresh() {
        let clock = Arc::new(ManualClock::new());
        let cache = QuoteCache::new(DEFAULT_TTL, clock.clone());

        cache.put(test_quote("VALE3"));
        clock.advance(DEFAULT_TTL);

        assert!(cache.get(&Symbol::parse("VALE3").unwrap()).is_some());
    }

    #[test]
    fn refuses_non_real_quotes() {
        let clock = Arc::new(ManualClock::new());
        let cache = QuoteCache::new(DEFAULT_TTL, clock);

        let mut quote = test_quote("AAPL");
        quote.is_real_data = false;
        cache.put(quote);

        assert_eq!(cache.entry_count(), 0);
        assert!(cache.get(&Symbol::parse("AAPL").unwrap()).is_none());
    }

    #[test]
    fn refresh_overwrites_the_previous_entry() {
        let clock = Arc::new(ManualClock::new());
        let cache = QuoteCache::new(DEFAULT_TTL, clock.clone());

        cache.put(test_quote("MSFT"));
        clock.advance(Duration::from_secs(120));

        let mut newer = test_quote("MSFT");
        newer.price = 250.0;
        cache.put(newer);

        let hit = cache.get(&Symbol::parse("MSFT").unwrap()).expect("fresh");
        assert!((hit.price - 250.0).abs() < 1e-9);
        assert_eq!(cache.entry_count(), 1);
    }
}
