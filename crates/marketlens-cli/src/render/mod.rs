//! Output rendering: console tables, PNG charts, and the xlsx workbook.

pub mod charts;
pub mod table;
pub mod workbook;
