//! # MarketLens Core
//!
//! Domain contracts and pipeline components for the MarketLens NSE market
//! sentiment report generator.
//!
//! ## Overview
//!
//! - **Validated domain models** for indicators, scores, volume and sector
//!   records, and the assembled report
//! - **`HistoryProvider` capability trait** with a Yahoo chart-API adapter,
//!   so tests can substitute a deterministic fake for the live network
//! - **`Prompt` capability trait** plus the `fetch_or_prompt` helper that
//!   implements the run's one error-recovery pattern: fetch once, fall
//!   back to a single interactive prompt
//! - **Pure score engine** computing the momentum-vs-manipulation index
//! - **Scanners** for per-symbol volume anomalies and the fixed sector set,
//!   with per-item failure isolation
//!
//! ## Error handling
//!
//! Fetch failures are structured [`history::SourceError`] values and never
//! escape their fetch site. Fatal errors (malformed console input, domain
//! validation) surface as [`CoreError`].

pub mod adapters;
pub mod domain;
pub mod error;
pub mod history;
pub mod http_client;
pub mod indicators;
pub mod prompt;
pub mod scan;
pub mod score;

pub use adapters::YahooHistoryProvider;
pub use domain::{
    round2, ActivityLevel, CompositeScore, DailyBar, IndicatorSet, PriceHistory, Report,
    ScoreLabel, SectorRecord, Symbol, UtcDateTime, VolumeRecord,
};
pub use error::{CoreError, ValidationError};
pub use history::{HistoryProvider, HistoryRequest, Lookback, SourceError, SourceErrorKind};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use indicators::{IndicatorSource, BENCHMARK_INDEX, VOLATILITY_INDEX};
pub use prompt::{fetch_or_prompt, Prompt, PromptError};
pub use scan::{SectorScanner, VolumeScanner, SECTOR_INDICES};
pub use score::{compute_score, score_indicators};
