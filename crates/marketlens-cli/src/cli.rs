//! CLI argument definitions for MarketLens.
//!
//! The binary runs a single end-to-end report: indicators, composite
//! score, volume scan, sector scan, charts, workbook. Symbols left off
//! the command line are asked for interactively, matching the tool's
//! console-driven workflow.

use std::path::PathBuf;

use clap::Parser;

/// MarketLens - NSE market sentiment report generator
///
/// Gathers FII/DII flows, a PCR price-ratio proxy, and the India VIX,
/// computes the momentum-vs-manipulation index (MMI), scans symbols for
/// volume anomalies and sector indices for day-over-day moves, then
/// renders charts and writes a three-sheet workbook.
#[derive(Debug, Parser)]
#[command(
    name = "marketlens",
    author,
    version,
    about = "NSE market sentiment report generator"
)]
pub struct Cli {
    /// Stock symbols to scan (e.g. RELIANCE SBIN INFY).
    ///
    /// The .NS exchange suffix is appended by convention; pass an explicit
    /// suffix (TCS.BO) or an index symbol (^NSEI) to override. When no
    /// symbols are given, the tool prompts for a comma-separated list.
    #[arg(num_args = 0..)]
    pub symbols: Vec<String>,

    /// Benchmark index used for the PCR price-ratio proxy.
    #[arg(long, default_value = "^NSEI")]
    pub index: String,

    /// Output path for the xlsx workbook (overwritten on every run).
    #[arg(long, default_value = "reports/market_analysis.xlsx")]
    pub out: PathBuf,

    /// Directory the PNG charts are written to.
    #[arg(long, default_value = "reports")]
    pub charts_dir: PathBuf,

    /// Skip chart rendering.
    #[arg(long, default_value_t = false)]
    pub no_charts: bool,

    /// Font family used in chart captions and labels.
    #[arg(long, default_value = "sans-serif")]
    pub font: String,

    /// Per-request fetch timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}
