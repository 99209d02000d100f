//! PNG chart rendering: the sentiment snapshot bars and the sector heatmap.

use std::fs;
use std::path::PathBuf;

use marketlens_core::{IndicatorSet, SectorRecord};
use plotters::prelude::*;

use crate::error::CliError;

const SENTIMENT_FILE: &str = "sentiment_snapshot.png";
const HEATMAP_FILE: &str = "sector_heatmap.png";

/// Explicit styling knobs for both charts. No global state; a renderer
/// draws exactly what its style says.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub font: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font: String::from("sans-serif"),
            width: 640,
            height: 440,
        }
    }
}

/// Writes the run's two charts into a target directory.
pub struct ChartRenderer {
    style: ChartStyle,
    out_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(style: ChartStyle, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            style,
            out_dir: out_dir.into(),
        }
    }

    /// Two-bar PCR/VIX snapshot. Returns the written path.
    pub fn render_sentiment(&self, indicators: &IndicatorSet) -> Result<PathBuf, CliError> {
        let path = self.prepare(SENTIMENT_FILE)?;
        let font = self.style.font.as_str();

        // The backend borrows the path until the drawing area drops.
        {
            let root = BitMapBackend::new(&path, (self.style.width, self.style.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let y_max = (indicators.pcr.max(indicators.vix) * 1.2).max(1.0);
            let mut chart = ChartBuilder::on(&root)
                .caption("Market Sentiment Snapshot", (font, 22))
                .margin(12)
                .x_label_area_size(24)
                .y_label_area_size(48)
                .build_cartesian_2d(0.0f64..2.0, 0.0f64..y_max)
                .map_err(draw_err)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("level")
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series([
                    Rectangle::new(
                        [(0.25, 0.0), (0.75, indicators.pcr)],
                        GREEN.mix(0.6).filled(),
                    ),
                    Rectangle::new(
                        [(1.25, 0.0), (1.75, indicators.vix)],
                        RED.mix(0.5).filled(),
                    ),
                ])
                .map_err(draw_err)?;
            chart
                .draw_series([
                    Text::new(
                        format!("PCR {:.2}", indicators.pcr),
                        (0.30, indicators.pcr + y_max * 0.03),
                        (font, 16),
                    ),
                    Text::new(
                        format!("VIX {:.2}", indicators.vix),
                        (1.30, indicators.vix + y_max * 0.03),
                        (font, 16),
                    ),
                ])
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Ok(path)
    }

    /// Single-column sector heatmap, one colored row per sector, shaded
    /// red through yellow to green over a +-3% window.
    pub fn render_sector_heatmap(&self, sectors: &[SectorRecord]) -> Result<PathBuf, CliError> {
        let path = self.prepare(HEATMAP_FILE)?;
        let font = self.style.font.as_str();

        // The backend borrows the path until the drawing area drops.
        {
            let root = BitMapBackend::new(&path, (self.style.width, self.style.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (header, grid) = root.split_vertically(40);
            header
                .draw(&Text::new("NSE Sector Performance", (16, 10), (font, 20)))
                .map_err(draw_err)?;

            if !sectors.is_empty() {
                let rows = grid.split_evenly((sectors.len(), 1));
                for (cell, record) in rows.iter().zip(sectors) {
                    cell.fill(&heat_color(record.change_percent))
                        .map_err(draw_err)?;
                    cell.draw(&Text::new(
                        format!("{:<12} {:+.2}%", record.sector, record.change_percent),
                        (12, 10),
                        (font, 16),
                    ))
                    .map_err(draw_err)?;
                }
            }

            root.present().map_err(draw_err)?;
        }

        Ok(path)
    }

    fn prepare(&self, file: &str) -> Result<PathBuf, CliError> {
        fs::create_dir_all(&self.out_dir)?;
        Ok(self.out_dir.join(file))
    }
}

/// Map a day change in percent onto a red-yellow-green ramp. Values are
/// clamped to the +-3% window before interpolation.
fn heat_color(change_percent: f64) -> RGBColor {
    const RED_END: (u8, u8, u8) = (196, 64, 54);
    const YELLOW_MID: (u8, u8, u8) = (240, 200, 80);
    const GREEN_END: (u8, u8, u8) = (70, 170, 90);

    let t = ((change_percent + 3.0) / 6.0).clamp(0.0, 1.0);
    let (lo, hi, local) = if t < 0.5 {
        (RED_END, YELLOW_MID, t * 2.0)
    } else {
        (YELLOW_MID, GREEN_END, (t - 0.5) * 2.0)
    };
    RGBColor(
        lerp(lo.0, hi.0, local),
        lerp(lo.1, hi.1, local),
        lerp(lo.2, hi.2, local),
    )
}

fn lerp(lo: u8, hi: u8, t: f64) -> u8 {
    (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * t).round() as u8
}

fn draw_err<E: std::fmt::Display>(err: E) -> CliError {
    CliError::Chart(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn heat_color_clamps_the_extremes() {
        assert_eq!(heat_color(-10.0), heat_color(-3.0));
        assert_eq!(heat_color(10.0), heat_color(3.0));
    }

    #[test]
    fn heat_color_is_yellow_at_flat_and_ordered_across_the_ramp() {
        let flat = heat_color(0.0);
        assert_eq!(flat, RGBColor(240, 200, 80));
        // Redder on losses, greener on gains.
        assert!(heat_color(-3.0).0 > heat_color(3.0).0);
        assert!(heat_color(3.0).1 > heat_color(-3.0).1);
    }

    #[test]
    fn renderer_targets_fixed_file_names() {
        let renderer = ChartRenderer::new(ChartStyle::default(), "reports");
        assert_eq!(
            renderer.out_dir.join(SENTIMENT_FILE),
            Path::new("reports/sentiment_snapshot.png")
        );
        assert_eq!(
            renderer.out_dir.join(HEATMAP_FILE),
            Path::new("reports/sector_heatmap.png")
        );
    }

    #[test]
    fn renders_both_charts_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        let indicators = IndicatorSet::new(1000.0, 800.0, 1.03, 14.6);
        let sentiment = match renderer.render_sentiment(&indicators) {
            Ok(path) => path,
            // Minimal images without fontconfig cannot resolve any family;
            // nothing to assert about pixels then.
            Err(CliError::Chart(message)) if message.to_lowercase().contains("font") => return,
            Err(other) => panic!("unexpected render failure: {other}"),
        };
        assert!(sentiment.exists());
        assert!(sentiment.metadata().expect("metadata").len() > 0);

        // Fonts resolved above, so the heatmap must render outright.
        let sectors = vec![
            SectorRecord::new("NIFTYBANK", 1.2).expect("record"),
            SectorRecord::new("NIFTYIT", -0.7).expect("record"),
        ];
        let heatmap = renderer.render_sector_heatmap(&sectors).expect("heatmap");
        assert!(heatmap.exists());
        assert!(heatmap.metadata().expect("metadata").len() > 0);
    }

    #[test]
    fn empty_sector_list_still_renders_a_heatmap_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ChartRenderer::new(ChartStyle::default(), dir.path());

        let heatmap = match renderer.render_sector_heatmap(&[]) {
            Ok(path) => path,
            Err(CliError::Chart(message)) if message.to_lowercase().contains("font") => return,
            Err(other) => panic!("unexpected render failure: {other}"),
        };
        assert!(heatmap.exists());
        assert!(heatmap.metadata().expect("metadata").len() > 0);
    }
}
