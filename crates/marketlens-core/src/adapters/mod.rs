//! Data provider adapters.

mod yahoo;

pub use yahoo::YahooHistoryProvider;
