#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Markdown report assembly and file output.
//!
//! Produces the final deliverable: a single UTF-8 Markdown file with the
//! data table, totals, and the AI-generated summary in a fixed section
//! order. The same string renders unchanged into any display panel.

use std::fmt::Write as _;
use std::path::Path;

use census_report_acs_models::GeoRecord;
use census_report_analytics::format::{group_thousands, sort_by_population};
use census_report_analytics::Aggregate;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while writing the report artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The final textual artifact of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Model-generated summary text.
    pub summary_text: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Creates a report stamped with the current time.
    #[must_use]
    pub fn new(summary_text: String) -> Self {
        Self {
            summary_text,
            generated_at: Utc::now(),
        }
    }
}

/// Renders the full report as Markdown: title, source line, data table
/// (descending by population), totals, then the AI summary. Section order
/// is fixed.
#[must_use]
pub fn build_report_md(records: &[GeoRecord], agg: &Aggregate, report: &Report, year: u16) -> String {
    let mut out = String::new();

    out.push_str("# Census State Population Report\n\n");
    let _ = writeln!(
        out,
        "*Source: Census API ACS 5-year {year} | Generated {}*\n",
        report.generated_at.format("%Y-%m-%d %H:%M")
    );

    out.push_str("## Data\n\n");
    out.push_str("| State | Population |\n");
    out.push_str("|-------|------------|\n");
    for r in sort_by_population(records) {
        let _ = writeln!(out, "| {} | {} |", r.name, group_thousands(r.population));
    }

    let _ = writeln!(
        out,
        "\n**Total:** {}  \n**Geographies:** {}\n",
        group_thousands(agg.total_population),
        records.len()
    );

    out.push_str("---\n\n## Summary\n\n");
    out.push_str(report.summary_text.trim());
    out.push('\n');

    out
}

/// Writes the report to disk as UTF-8.
///
/// # Errors
///
/// Returns [`GenerateError::Io`] if the file cannot be written.
pub fn write_report(path: &Path, markdown: &str) -> Result<(), GenerateError> {
    std::fs::write(path, markdown)?;
    Ok(())
}
