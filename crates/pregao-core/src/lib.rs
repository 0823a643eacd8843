//! # Pregão Core
//!
//! Market-quote acquisition engine for the Pregão toolkit.
//!
//! ## Overview
//!
//! This crate provides everything needed to turn a ticker symbol into a
//! genuine, recent market quote:
//!
//! - **Canonical domain models** for symbols, quotes and price ranges
//! - **Provider adapters** for Brapi, Twelve Data and Alpha Vantage
//! - **TTL cache** so repeated lookups do not hit the vendors
//! - **Sliding-window rate limiter** guarding the quota-limited vendor
//! - **Fallback routing** that walks providers in regional priority order
//! - **Service facade** wiring the whole pipeline behind two calls
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Brapi, Twelve Data, Alpha Vantage) |
//! | [`cache`] | TTL quote cache |
//! | [`clock`] | Injectable time source |
//! | [`credentials`] | Per-provider credential resolution |
//! | [`domain`] | Domain models (Quote, Symbol, PriceRange) |
//! | [`error`] | Error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`provider`] | Quote source trait and source errors |
//! | [`rate_limit`] | Sliding-window rate limiter |
//! | [`routing`] | Attempt planning and fallback execution |
//! | [`service`] | Service facade and health reporting |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pregao_core::{QuoteService, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = QuoteService::from_env();
//!
//!     let symbol = Symbol::parse("PETR4.SA")?;
//!     let quote = service.get_quote(&symbol).await?;
//!     println!("{} trades at {:.2}", quote.symbol, quote.price);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Host     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteService   │────▶│ QuoteCache (TTL) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteRouter    │────▶│ SlidingWindow    │
//! │  (fallback)     │     │ (rate limiter)   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ QuoteSource     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/canned) │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! - API keys are read from environment variables only (never logged)
//! - Placeholder keys (`demo`, `YOUR_API_KEY`, ...) are treated as absent
//! - Input validation on all domain types

pub mod adapters;
pub mod cache;
pub mod clock;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod provider;
pub mod rate_limit;
pub mod routing;
pub mod service;
pub mod source;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{AlphaVantageAdapter, BrapiAdapter, TwelveDataAdapter};

// Caching and throttling
pub use cache::QuoteCache;
pub use rate_limit::SlidingWindow;

// Clock abstraction
pub use clock::{Clock, ManualClock, SystemClock};

// Credentials
pub use credentials::{Credential, ProviderCredentials};

// Domain models
pub use domain::{classify, MarketRegion, PriceRange, Quote, Symbol, UtcDateTime};

// Error types
pub use error::{QuoteError, ValidationError};

// Source contract
pub use provider::{FetchFuture, QuoteSource, SourceError, SourceErrorKind};

// Routing
pub use routing::{plan_attempts, QuoteRouter};

// Service facade
pub use service::{HealthReport, ProviderHealth, QuoteService, QuoteServiceConfig};

// Provider identifiers
pub use source::ProviderId;
