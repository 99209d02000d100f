//! Three-sheet xlsx export of the assembled report.

use std::fs;
use std::path::Path;

use marketlens_core::Report;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::CliError;

/// Write the report to `path`, creating parent directories as needed and
/// replacing any existing file. Sheets: "Operator Activity", "Sector
/// Performance", "Summary".
pub fn write_report(report: &Report, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Operator Activity")?;
    for (col, header) in ["Symbol", "Volume Ratio", "Activity", "LTP", "Change (%)"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, record) in report.volume.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &record.symbol)?;
        sheet.write_number(row, 1, record.volume_ratio)?;
        sheet.write_string(row, 2, record.activity.as_str())?;
        sheet.write_number(row, 3, record.last_price)?;
        sheet.write_number(row, 4, record.change_percent)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Sector Performance")?;
    sheet.write_string_with_format(0, 0, "Sector", &bold)?;
    sheet.write_string_with_format(0, 1, "Change (%)", &bold)?;
    for (i, record) in report.sectors.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &record.sector)?;
        sheet.write_number(row, 1, record.change_percent)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;
    for (col, header) in ["MMI", "Status", "FII (Cr)", "DII (Cr)", "VIX", "PCR", "Date"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    sheet.write_number(1, 0, report.score.value)?;
    sheet.write_string(1, 1, report.score.label.as_str())?;
    sheet.write_number(1, 2, report.indicators.fii)?;
    sheet.write_number(1, 3, report.indicators.dii)?;
    sheet.write_number(1, 4, report.indicators.vix)?;
    sheet.write_number(1, 5, report.indicators.pcr)?;
    sheet.write_string(1, 6, report.generated_at.format_rfc3339())?;

    workbook.save(path)?;
    Ok(())
}
