//! Output writers for reports and flame graphs.
//!
//! This module handles writing data to disk and to the terminal:
//! - Flamebearer payloads and table reports as JSON
//! - SVG flame graphs and collapsed-stack text
//! - Colored terminal tables and tooltips

pub mod json;
pub mod svg;
pub mod terminal;

// Re-export main functions
pub use json::{
    read_table_report, write_flamebearer, write_table_report, TableReportFile,
};
pub use svg::{write_svg, write_text};
pub use terminal::{render_terminal_table, render_tooltip};
