//! MarketLens binary: one console-driven run producing the console
//! report, two PNG charts, and the xlsx workbook.

mod cli;
mod error;
mod prompt;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use marketlens_core::{
    score_indicators, IndicatorSet, IndicatorSource, Prompt, Report, ReqwestHttpClient,
    ScoreLabel, SectorScanner, Symbol, VolumeScanner, YahooHistoryProvider,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::prompt::ConsolePrompt;
use crate::render::charts::{ChartRenderer, ChartStyle};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    println!("📈 MarketLens — NSE market sentiment report");
    println!("============================================");

    let http_client = Arc::new(ReqwestHttpClient::new());
    let provider = YahooHistoryProvider::new(http_client).with_timeout_ms(cli.timeout_ms);
    let console = ConsolePrompt::new();
    let index = Symbol::parse(&cli.index)?;

    let source = IndicatorSource::new(&provider, &console);
    let (fii, dii) = source.read_flows()?;
    println!("🏦 FII net: ₹{fii:.2} Cr | DII net: ₹{dii:.2} Cr");

    let pcr = source.fetch_pcr(&index).await?;
    println!("🧮 Approx. PCR (price ratio): {pcr:.2}");
    let vix = source.fetch_vix().await?;
    println!("⚡ India VIX: {vix:.2}");

    let indicators = IndicatorSet::new(fii, dii, pcr, vix);
    let score = score_indicators(&indicators);
    if score.label == ScoreLabel::Undefined {
        println!("\n⚠️  MMI undefined: PCR and VIX must both be non-zero");
    } else {
        println!("\n📊 MMI: {:.2} → {}", score.value, score.label.as_str());
    }

    let symbols = resolve_symbols(&cli.symbols, &console)?;

    println!("\n🎛️  Operator volume tracker ({} symbols)", symbols.len());
    let volume = VolumeScanner::new(&provider, &console)
        .scan_all(&symbols)
        .await?;
    print!("{}", render::table::volume_table(&volume));

    println!("\n🧭 Sector scan");
    let sectors = SectorScanner::new(&provider, &console).scan_all().await?;

    let report = Report::new(indicators, score, volume, sectors);

    if !cli.no_charts {
        let style = ChartStyle {
            font: cli.font.clone(),
            ..ChartStyle::default()
        };
        let renderer = ChartRenderer::new(style, &cli.charts_dir);
        let sentiment = renderer.render_sentiment(&report.indicators)?;
        println!("🖼️  Sentiment chart → {}", sentiment.display());
        let heatmap = renderer.render_sector_heatmap(&report.sectors)?;
        println!("🖼️  Sector heatmap → {}", heatmap.display());
    }

    render::workbook::write_report(&report, &cli.out)?;
    println!("💾 Workbook saved → {}", cli.out.display());
    println!(
        "\n✅ Analysis complete — MMI {:.2} ({})",
        report.score.value,
        report.score.label.as_str()
    );

    Ok(ExitCode::SUCCESS)
}

/// Symbols from the command line, or one comma-separated prompt when none
/// were given. Blank entries are dropped; an all-blank answer yields an
/// empty scan rather than an error.
fn resolve_symbols(args: &[String], prompt: &dyn Prompt) -> Result<Vec<String>, CliError> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }
    let line = prompt.read_line("stock symbols, comma separated (e.g. RELIANCE,SBIN,INFY)")?;
    Ok(line
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
mod tests {
    use marketlens_core::{Prompt, PromptError};

    use super::resolve_symbols;

    struct OneLinePrompt {
        line: &'static str,
    }

    impl Prompt for OneLinePrompt {
        fn read_value(&self, label: &str) -> Result<f64, PromptError> {
            Err(PromptError::Closed {
                label: label.to_owned(),
            })
        }

        fn read_line(&self, _label: &str) -> Result<String, PromptError> {
            Ok(self.line.to_owned())
        }
    }

    #[test]
    fn cli_symbols_bypass_the_prompt() {
        let prompt = OneLinePrompt { line: "IGNORED" };
        let symbols =
            resolve_symbols(&[String::from("RELIANCE")], &prompt).expect("symbols");
        assert_eq!(symbols, vec![String::from("RELIANCE")]);
    }

    #[test]
    fn prompted_list_is_split_and_trimmed() {
        let prompt = OneLinePrompt {
            line: " RELIANCE, SBIN ,,INFY ",
        };
        let symbols = resolve_symbols(&[], &prompt).expect("symbols");
        assert_eq!(
            symbols,
            vec![
                String::from("RELIANCE"),
                String::from("SBIN"),
                String::from("INFY")
            ]
        );
    }

    #[test]
    fn blank_answer_yields_an_empty_scan() {
        let prompt = OneLinePrompt { line: "   " };
        let symbols = resolve_symbols(&[], &prompt).expect("symbols");
        assert!(symbols.is_empty());
    }
}
