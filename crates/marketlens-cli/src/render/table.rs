//! Fixed-width console table for the volume scan results.

use std::fmt::Write;

use marketlens_core::VolumeRecord;

/// Render the volume scan as an aligned text table, one row per symbol.
/// Returns an empty-bodied table (header only) for an empty scan.
pub fn volume_table(records: &[VolumeRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:<24} {:>12} {:>9}",
        "Symbol", "Vol Ratio", "Activity", "LTP", "Chg (%)"
    );
    let _ = writeln!(out, "{}", "-".repeat(72));
    for record in records {
        let _ = writeln!(
            out,
            "{:<12} {:>10.2} {:<24} {:>12.2} {:>+9.2}",
            record.symbol,
            record.volume_ratio,
            record.activity.as_str(),
            record.last_price,
            record.change_percent
        );
    }
    out
}
