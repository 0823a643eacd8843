//! CLI argument definitions for Pregão.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch the latest quote for one symbol |
//! | `quotes` | Fetch quotes for several symbols at once |
//! | `health` | Report provider configuration and runtime budgets |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `8000` | Per-request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Fetch a single quote
//! pregao quote PETR4.SA
//!
//! # Fetch several quotes, bypassing the cache
//! pregao quotes PETR4.SA VALE3 AAPL --refresh --pretty
//!
//! # Inspect provider readiness
//! pregao health
//! ```

use clap::{Args, Parser, Subcommand};

/// Pregão - multi-provider market quote CLI
///
/// Fetch genuine market quotes from Brapi, Twelve Data and Alpha Vantage
/// with caching, rate limiting and regional provider fallback.
#[derive(Debug, Parser)]
#[command(
    name = "pregao",
    author,
    version,
    about = "Multi-provider market quote CLI",
    long_about = "Pregão resolves ticker symbols into genuine market quotes. Features include:\n\
\n\
  • Multi-provider support (Brapi, Twelve Data, Alpha Vantage)\n\
  • B3 symbols routed to the Brazilian specialist first\n\
  • TTL cache and quota-aware rate limiting\n\
  • Structured JSON output\n\
\n\
Use 'pregao <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 8000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest quote for one symbol.
    ///
    /// # Examples
    ///
    ///   pregao quote PETR4.SA
    ///   pregao quote AAPL --pretty
    Quote(QuoteArgs),

    /// Fetch quotes for several symbols concurrently.
    ///
    /// Results keep the input order. If any symbol cannot be resolved the
    /// whole command fails and names the offending symbols.
    ///
    /// # Examples
    ///
    ///   pregao quotes PETR4.SA VALE3
    ///   pregao quotes AAPL MSFT --refresh
    Quotes(QuotesArgs),

    /// Report provider configuration, rate budget and cache population.
    ///
    /// # Examples
    ///
    ///   pregao health --pretty
    Health,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker symbol, e.g. PETR4.SA or AAPL.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Ticker symbols, e.g. PETR4.SA VALE3 AAPL.
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Bypass cached quotes and hit the providers again.
    #[arg(long, default_value_t = false)]
    pub refresh: bool,
}
