//! Per-provider credential resolution.
//!
//! Keys are read from the environment once at service construction
//! (`PREGAO_*` first, unprefixed fallback second). A missing key, an empty
//! value, a value equal to the variable's own name, or a recognized demo
//! token all mean the provider is unconfigured and is skipped entirely.

use std::env;

use log::warn;

use crate::ProviderId;

/// Values vendors hand out in documentation samples. A key equal to one of
/// these never returns real market data.
const PLACEHOLDER_TOKENS: [&str; 3] = ["demo", "YOUR_API_KEY", "changeme"];

/// Resolved secret for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Snapshot of every provider's credential, resolved once per process.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    brapi: Option<Credential>,
    twelvedata: Option<Credential>,
    alphavantage: Option<Credential>,
}

impl ProviderCredentials {
    /// Read all provider keys from the environment.
    pub fn from_env() -> Self {
        Self {
            brapi: resolve(ProviderId::Brapi, "PREGAO_BRAPI_TOKEN", "BRAPI_TOKEN"),
            twelvedata: resolve(
                ProviderId::TwelveData,
                "PREGAO_TWELVE_DATA_API_KEY",
                "TWELVE_DATA_API_KEY",
            ),
            alphavantage: resolve(
                ProviderId::AlphaVantage,
                "PREGAO_ALPHA_VANTAGE_API_KEY",
                "ALPHA_VANTAGE_API_KEY",
            ),
        }
    }

    /// Explicit credential set, mainly for tests and embedding hosts.
    pub fn with_keys(
        brapi: Option<String>,
        twelvedata: Option<String>,
        alphavantage: Option<String>,
    ) -> Self {
        Self {
            brapi: brapi.map(Credential),
            twelvedata: twelvedata.map(Credential),
            alphavantage: alphavantage.map(Credential),
        }
    }

    pub fn get(&self, provider: ProviderId) -> Option<&Credential> {
        match provider {
            ProviderId::Brapi => self.brapi.as_ref(),
            ProviderId::TwelveData => self.twelvedata.as_ref(),
            ProviderId::AlphaVantage => self.alphavantage.as_ref(),
        }
    }

    pub fn is_configured(&self, provider: ProviderId) -> bool {
        self.get(provider).is_some()
    }

    /// Providers with a resolved credential, in `ProviderId::ALL` order.
    pub fn configured(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|provider| self.is_configured(*provider))
            .collect()
    }
}

fn resolve(provider: ProviderId, primary_var: &str, fallback_var: &str) -> Option<Credential> {
    let (var, value) = match env::var(primary_var) {
        Ok(value) => (primary_var, value),
        Err(_) => (fallback_var, env::var(fallback_var).ok()?),
    };

    if is_placeholder(var, &value) {
        warn!("ignoring placeholder credential in {var}; provider '{provider}' stays unconfigured");
        return None;
    }

    Some(Credential(value))
}

fn is_placeholder(var_name: &str, value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.eq_ignore_ascii_case(var_name) {
        return true;
    }
    PLACEHOLDER_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_values_are_rejected() {
        assert!(is_placeholder("BRAPI_TOKEN", ""));
        assert!(is_placeholder("BRAPI_TOKEN", "   "));
        assert!(is_placeholder("BRAPI_TOKEN", "BRAPI_TOKEN"));
        assert!(is_placeholder("BRAPI_TOKEN", "brapi_token"));
        assert!(is_placeholder("ALPHA_VANTAGE_API_KEY", "demo"));
        assert!(is_placeholder("TWELVE_DATA_API_KEY", "YOUR_API_KEY"));
    }

    #[test]
    fn real_keys_pass() {
        assert!(!is_placeholder("BRAPI_TOKEN", "x9GkT2rP"));
    }

    #[test]
    fn explicit_keys_report_configured_set() {
        let creds =
            ProviderCredentials::with_keys(Some("t".into()), None, Some("k".into()));

        assert!(creds.is_configured(ProviderId::Brapi));
        assert!(!creds.is_configured(ProviderId::TwelveData));
        assert_eq!(
            creds.configured(),
            vec![ProviderId::Brapi, ProviderId::AlphaVantage]
        );
    }
}
