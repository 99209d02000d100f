//! Canonical domain types for MarketLens reports.
//!
//! All models are validated at construction (invalid states fail with a
//! [`crate::ValidationError`]) and carry full serde support.

mod models;
mod symbol;
mod timestamp;

pub use models::{
    round2, ActivityLevel, CompositeScore, DailyBar, IndicatorSet, PriceHistory, Report,
    ScoreLabel, SectorRecord, VolumeRecord,
};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
