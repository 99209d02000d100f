use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime, ValidationError};

/// Round to two decimal places, the precision every reported figure uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Daily close/volume observation, most-recent-last inside a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub ts: UtcDateTime,
    pub close: f64,
    pub volume: Option<u64>,
}

impl DailyBar {
    pub fn new(ts: UtcDateTime, close: f64, volume: Option<u64>) -> Result<Self, ValidationError> {
        validate_non_negative("close", close)?;
        Ok(Self { ts, close, volume })
    }
}

/// Ordered daily history for one symbol, most-recent-last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub symbol: Symbol,
    pub bars: Vec<DailyBar>,
}

impl PriceHistory {
    pub fn new(symbol: Symbol, bars: Vec<DailyBar>) -> Self {
        Self { symbol, bars }
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    pub fn prior_close(&self) -> Option<f64> {
        let len = self.bars.len();
        if len < 2 {
            return None;
        }
        Some(self.bars[len - 2].close)
    }

    pub fn mean_close(&self) -> Option<f64> {
        if self.bars.is_empty() {
            return None;
        }
        let sum: f64 = self.bars.iter().map(|bar| bar.close).sum();
        Some(sum / self.bars.len() as f64)
    }

    pub fn last_volume(&self) -> Option<u64> {
        self.bars.last().and_then(|bar| bar.volume)
    }

    /// Mean over bars that actually report a volume.
    pub fn mean_volume(&self) -> Option<f64> {
        let volumes: Vec<u64> = self.bars.iter().filter_map(|bar| bar.volume).collect();
        if volumes.is_empty() {
            return None;
        }
        let sum: f64 = volumes.iter().map(|v| *v as f64).sum();
        Some(sum / volumes.len() as f64)
    }

    /// Day-over-day percentage change of the close, rounded to 2 decimals.
    /// None when fewer than two closes exist or the prior close is zero.
    pub fn day_change_percent(&self) -> Option<f64> {
        let last = self.last_close()?;
        let prior = self.prior_close()?;
        if prior == 0.0 {
            return None;
        }
        Some(round2((last - prior) / prior * 100.0))
    }
}

/// The four scalar indicators a run is built from. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// FII net flow in ₹ Cr, positive for net buying.
    pub fii: f64,
    /// DII net flow in ₹ Cr, positive for net buying.
    pub dii: f64,
    /// Price-ratio PCR proxy (latest close over 5-day mean close).
    pub pcr: f64,
    /// Volatility index level.
    pub vix: f64,
}

impl IndicatorSet {
    pub fn new(fii: f64, dii: f64, pcr: f64, vix: f64) -> Self {
        Self { fii, dii, pcr, vix }
    }
}

/// Qualitative reading of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    MomentumDriven,
    Balanced,
    ManipulationRisk,
    Undefined,
}

impl ScoreLabel {
    /// Threshold rules: above 1.5 momentum, 1.0..=1.5 balanced, below 1.0
    /// manipulation risk. Exactly 1.5 and exactly 1.0 are both Balanced.
    pub fn classify(value: f64) -> Self {
        if value > 1.5 {
            Self::MomentumDriven
        } else if value >= 1.0 {
            Self::Balanced
        } else {
            Self::ManipulationRisk
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MomentumDriven => "Momentum Driven",
            Self::Balanced => "Balanced",
            Self::ManipulationRisk => "Manipulation Risk",
            Self::Undefined => "Undefined",
        }
    }
}

/// Composite momentum-vs-manipulation index, derived once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub value: f64,
    pub label: ScoreLabel,
}

impl CompositeScore {
    pub const fn undefined() -> Self {
        Self {
            value: 0.0,
            label: ScoreLabel::Undefined,
        }
    }
}

/// Volume-spike classification for a scanned symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Normal,
    OperatorActivity,
    HeavyControl,
}

impl ActivityLevel {
    /// Ratio below 2 is normal, 2..<4 operator activity, 4 and above heavy
    /// control. The boundaries belong to the higher band.
    pub fn classify(volume_ratio: f64) -> Self {
        if volume_ratio >= 4.0 {
            Self::HeavyControl
        } else if volume_ratio >= 2.0 {
            Self::OperatorActivity
        } else {
            Self::Normal
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::OperatorActivity => "Operator Activity",
            Self::HeavyControl => "Heavy Operator Control",
        }
    }
}

/// One scanned symbol's volume anomaly snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub symbol: String,
    pub volume_ratio: f64,
    pub activity: ActivityLevel,
    pub last_price: f64,
    pub change_percent: f64,
}

impl VolumeRecord {
    pub fn new(
        symbol: impl Into<String>,
        volume_ratio: f64,
        last_price: f64,
        change_percent: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("volume_ratio", volume_ratio)?;
        validate_non_negative("last_price", last_price)?;
        validate_finite("change_percent", change_percent)?;

        Ok(Self {
            symbol: symbol.into(),
            volume_ratio,
            activity: ActivityLevel::classify(volume_ratio),
            last_price,
            change_percent,
        })
    }
}

/// Day-over-day move of one sector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub sector: String,
    pub change_percent: f64,
}

impl SectorRecord {
    pub fn new(sector: impl Into<String>, change_percent: f64) -> Result<Self, ValidationError> {
        validate_finite("change_percent", change_percent)?;
        Ok(Self {
            sector: sector.into(),
            change_percent,
        })
    }
}

/// Write-once aggregate of a full run, consumed by the renderer and the
/// workbook exporter and never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub indicators: IndicatorSet,
    pub score: CompositeScore,
    pub volume: Vec<VolumeRecord>,
    pub sectors: Vec<SectorRecord>,
    pub generated_at: UtcDateTime,
}

impl Report {
    pub fn new(
        indicators: IndicatorSet,
        score: CompositeScore,
        volume: Vec<VolumeRecord>,
        sectors: Vec<SectorRecord>,
    ) -> Self {
        Self {
            indicators,
            score,
            volume,
            sectors,
            generated_at: UtcDateTime::now(),
        }
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
