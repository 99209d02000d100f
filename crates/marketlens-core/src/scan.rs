//! Volume-spike and sector scanners.
//!
//! Both walk their inputs strictly in order, one fetch at a time, and
//! isolate per-item failures: a symbol or sector that cannot be fetched is
//! filled in through fallback prompts instead of aborting the batch.

use crate::history::{HistoryProvider, HistoryRequest, Lookback, SourceError};
use crate::prompt::Prompt;
use crate::{round2, CoreError, SectorRecord, Symbol, VolumeRecord};

/// Fixed mapping of NSE sector names to their Yahoo index symbols.
pub const SECTOR_INDICES: [(&str, &str); 8] = [
    ("NIFTYBANK", "^NSEBANK"),
    ("NIFTYIT", "^CNXIT"),
    ("NIFTYFMCG", "^CNXFMCG"),
    ("NIFTYMETAL", "^CNXMETAL"),
    ("NIFTYAUTO", "^CNXAUTO"),
    ("NIFTYPHARMA", "^CNXPHARMA"),
    ("NIFTYREALTY", "^CNXREALTY"),
    ("NIFTYENERGY", "^CNXENERGY"),
];

/// Scans requested symbols for volume anomalies against their one-month
/// average.
pub struct VolumeScanner<'a> {
    provider: &'a dyn HistoryProvider,
    prompt: &'a dyn Prompt,
}

impl<'a> VolumeScanner<'a> {
    pub fn new(provider: &'a dyn HistoryProvider, prompt: &'a dyn Prompt) -> Self {
        Self { provider, prompt }
    }

    /// Scan every symbol in input order. Duplicates are processed
    /// independently; one record comes back per input symbol.
    pub async fn scan_all(&self, symbols: &[String]) -> Result<Vec<VolumeRecord>, CoreError> {
        let mut records = Vec::with_capacity(symbols.len());
        for raw in symbols {
            let display = raw.trim().to_ascii_uppercase();
            let record = match self.scan_one(&display).await {
                Ok(record) => record,
                Err(_) => self.prompt_record(&display)?,
            };
            records.push(record);
        }
        Ok(records)
    }

    async fn scan_one(&self, display: &str) -> Result<VolumeRecord, SourceError> {
        let symbol =
            Symbol::nse_equity(display).map_err(|e| SourceError::invalid_request(e.to_string()))?;
        let history = self
            .provider
            .daily_history(HistoryRequest::new(symbol, Lookback::OneMonth))
            .await?;

        let last_volume = history
            .last_volume()
            .ok_or_else(|| SourceError::empty_series("no volume data"))?;
        let mean_volume = history
            .mean_volume()
            .filter(|mean| *mean > 0.0)
            .ok_or_else(|| SourceError::empty_series("zero mean volume"))?;
        let ratio = round2(last_volume as f64 / mean_volume);

        let last_price = history
            .last_close()
            .map(round2)
            .ok_or_else(|| SourceError::empty_series("no closes"))?;
        let change_percent = history
            .day_change_percent()
            .ok_or_else(|| SourceError::empty_series("fewer than two closes"))?;

        VolumeRecord::new(display, ratio, last_price, change_percent)
            .map_err(|e| SourceError::internal(e.to_string()))
    }

    /// Same-shape fallback: three prompts, same classification thresholds.
    fn prompt_record(&self, display: &str) -> Result<VolumeRecord, CoreError> {
        let ratio = self
            .prompt
            .read_value(&format!("volume ratio for {display}"))?;
        let last_price = self.prompt.read_value(&format!("LTP for {display}"))?;
        let change_percent = self
            .prompt
            .read_value(&format!("change (%) for {display}"))?;

        Ok(VolumeRecord::new(
            display,
            ratio,
            last_price,
            change_percent,
        )?)
    }
}

/// Computes day-over-day moves for the fixed set of sector indices.
pub struct SectorScanner<'a> {
    provider: &'a dyn HistoryProvider,
    prompt: &'a dyn Prompt,
}

impl<'a> SectorScanner<'a> {
    pub fn new(provider: &'a dyn HistoryProvider, prompt: &'a dyn Prompt) -> Self {
        Self { provider, prompt }
    }

    /// Always returns exactly one record per sector, in table order; a
    /// failed fetch is filled in via prompt, never dropped.
    pub async fn scan_all(&self) -> Result<Vec<SectorRecord>, CoreError> {
        let mut records = Vec::with_capacity(SECTOR_INDICES.len());
        for (sector, index) in SECTOR_INDICES {
            let change_percent = match self.scan_one(index).await {
                Ok(value) => value,
                Err(_) => self
                    .prompt
                    .read_value(&format!("manual % change for {sector}"))?,
            };
            records.push(SectorRecord::new(sector, change_percent)?);
        }
        Ok(records)
    }

    async fn scan_one(&self, index: &str) -> Result<f64, SourceError> {
        let symbol =
            Symbol::parse(index).map_err(|e| SourceError::invalid_request(e.to_string()))?;
        let history = self
            .provider
            .daily_history(HistoryRequest::new(symbol, Lookback::FiveDays))
            .await?;
        history
            .day_change_percent()
            .ok_or_else(|| SourceError::empty_series("fewer than two closes"))
    }
}
