pub mod quote;
pub mod region;
pub mod symbol;
pub mod timestamp;

pub use quote::{PriceRange, Quote};
pub use region::{classify, MarketRegion};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
