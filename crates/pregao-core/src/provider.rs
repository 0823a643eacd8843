//! Provider adapter contract.
//!
//! Every upstream data source implements [`QuoteSource`]: one symbol in, one
//! canonical [`Quote`] out. A provider never halts the fallback chain: any
//! vendor error, quota message, malformed payload or timeout surfaces as a
//! [`SourceError`] that the router treats as absence and steps past.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::HttpError;
use crate::{ProviderId, Quote, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Vendor answered but carried no usable quote (missing price, empty
    /// result set, explicit error object).
    MissingData,
    /// Vendor reported its own quota/throttle, or the local limiter denied
    /// admission.
    RateLimited,
    /// Transport failure or timeout.
    Transport,
    /// Vendor payload did not parse.
    Malformed,
    /// Provider has no resolved credential and was never attempted.
    Unconfigured,
}

/// Structured source error consumed by the fallback router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    provider: ProviderId,
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn missing_data(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::MissingData,
            message: message.into(),
        }
    }

    pub fn rate_limited(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn transport(provider: ProviderId, error: &HttpError) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::Transport,
            message: error.message().to_owned(),
        }
    }

    pub fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub fn unconfigured(provider: ProviderId) -> Self {
        Self {
            provider,
            kind: SourceErrorKind::Unconfigured,
            message: format!("provider '{provider}' has no resolved credential"),
        }
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::MissingData => "source.missing_data",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::Unconfigured => "source.unconfigured",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.provider, self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>>;

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`; the batch coordinator shares them
/// across concurrent symbol lookups.
pub trait QuoteSource: Send + Sync {
    /// Unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetch one canonical quote. A successful result is always genuine
    /// vendor data (`is_real_data == true`); adapters never fabricate a
    /// whole quote.
    fn fetch<'a>(&'a self, symbol: &'a Symbol) -> FetchFuture<'a>;
}
