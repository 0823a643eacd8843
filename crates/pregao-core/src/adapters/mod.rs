pub mod alphavantage;
pub mod brapi;
pub mod twelvedata;

pub use alphavantage::AlphaVantageAdapter;
pub use brapi::BrapiAdapter;
pub use twelvedata::TwelveDataAdapter;
