//! Composite momentum-vs-manipulation index (MMI).
//!
//! Pure arithmetic over the four indicators: institutional flow agreement
//! scaled by inverse volatility and inverse PCR. No side effects and no
//! error path beyond the zero-divisor guard.

use crate::{round2, CompositeScore, IndicatorSet, ScoreLabel};

/// Compute the composite score from the four indicators.
///
/// A zero PCR or VIX makes the formula meaningless; the result is the
/// `Undefined` sentinel rather than an error.
pub fn compute_score(fii: f64, dii: f64, pcr: f64, vix: f64) -> CompositeScore {
    if pcr == 0.0 || vix == 0.0 {
        return CompositeScore::undefined();
    }

    let value = round2((fii + dii) / ((fii - dii).abs() + 1.0) * (15.0 / vix) * (1.0 / pcr));

    CompositeScore {
        value,
        label: ScoreLabel::classify(value),
    }
}

/// Convenience wrapper over an assembled [`IndicatorSet`].
pub fn score_indicators(indicators: &IndicatorSet) -> CompositeScore {
    compute_score(
        indicators.fii,
        indicators.dii,
        indicators.pcr,
        indicators.vix,
    )
}
