//! Indicator acquisition: user-entered institutional flows plus fetched
//! PCR proxy and volatility index, each with a single-prompt fallback.

use crate::history::{HistoryProvider, HistoryRequest, Lookback, SourceError};
use crate::prompt::{fetch_or_prompt, Prompt, PromptError};
use crate::{round2, IndicatorSet, Symbol};

/// Benchmark index used for the PCR price-ratio proxy.
pub const BENCHMARK_INDEX: &str = "^NSEI";

/// India VIX index symbol.
pub const VOLATILITY_INDEX: &str = "^INDIAVIX";

/// Supplies the four scalar indicators for a run.
pub struct IndicatorSource<'a> {
    provider: &'a dyn HistoryProvider,
    prompt: &'a dyn Prompt,
}

impl<'a> IndicatorSource<'a> {
    pub fn new(provider: &'a dyn HistoryProvider, prompt: &'a dyn Prompt) -> Self {
        Self { provider, prompt }
    }

    /// Prompt for FII and DII net flows in ₹ Cr. No validation beyond
    /// numeric parseability; a malformed number is fatal.
    pub fn read_flows(&self) -> Result<(f64, f64), PromptError> {
        let fii = self
            .prompt
            .read_value("FII net in ₹ Cr (positive for buy, negative for sell)")?;
        let dii = self
            .prompt
            .read_value("DII net in ₹ Cr (positive for buy, negative for sell)")?;
        Ok((fii, dii))
    }

    /// PCR approximated as latest close over the 5-day mean close of the
    /// benchmark index, rounded to 2 decimals. The proxy is preserved
    /// as-is even though it is unrelated to options open interest.
    pub async fn fetch_pcr(&self, index: &Symbol) -> Result<f64, PromptError> {
        let provider = self.provider;
        fetch_or_prompt(
            || async move {
                let history = provider
                    .daily_history(HistoryRequest::new(index.clone(), Lookback::FiveDays))
                    .await?;
                let latest = history
                    .last_close()
                    .ok_or_else(|| SourceError::empty_series("no closes for benchmark index"))?;
                let mean = history
                    .mean_close()
                    .filter(|mean| *mean != 0.0)
                    .ok_or_else(|| SourceError::empty_series("zero mean close"))?;
                Ok(round2(latest / mean))
            },
            self.prompt,
            "manual PCR value (e.g. 1.05)",
        )
        .await
    }

    /// Latest volatility index close over a 5-day window, rounded to 2
    /// decimals, with the same single-prompt fallback.
    pub async fn fetch_vix(&self) -> Result<f64, PromptError> {
        let provider = self.provider;
        fetch_or_prompt(
            || async move {
                let symbol = Symbol::parse(VOLATILITY_INDEX)
                    .map_err(|e| SourceError::invalid_request(e.to_string()))?;
                let history = provider
                    .daily_history(HistoryRequest::new(symbol, Lookback::FiveDays))
                    .await?;
                let latest = history
                    .last_close()
                    .ok_or_else(|| SourceError::empty_series("no closes for volatility index"))?;
                Ok(round2(latest))
            },
            self.prompt,
            "manual India VIX value (e.g. 14.6)",
        )
        .await
    }

    /// Run the three acquisition steps in order and assemble the set.
    pub async fn collect(&self, index: &Symbol) -> Result<IndicatorSet, PromptError> {
        let (fii, dii) = self.read_flows()?;
        let pcr = self.fetch_pcr(index).await?;
        let vix = self.fetch_vix().await?;
        Ok(IndicatorSet::new(fii, dii, pcr, vix))
    }
}
