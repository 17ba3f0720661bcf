//! The fetch -> process -> report pipeline.
//!
//! Three stages run in strict sequence, once per invocation. Data flows
//! forward only; the first failing stage short-circuits the run. The
//! provider is passed through the [`LlmProvider`] trait so tests can
//! inject a stub backend.

use std::path::Path;
use std::time::Instant;

use census_report_acs::{AcsError, AcsQuery};
use census_report_acs_models::GeoRecord;
use census_report_ai::prompt::{SYSTEM_INSTRUCTION, build_user_prompt};
use census_report_ai::{AiError, LlmProvider};
use census_report_analytics::{Aggregate, AnalyticsError, aggregate, format_for_prompt};
use census_report_generate::{GenerateError, Report, build_report_md, write_report};
use thiserror::Error;

/// Errors from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetch stage failed.
    #[error(transparent)]
    Acs(#[from] AcsError),

    /// Process stage failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Report stage failed at the backend call.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// Report stage failed writing the artifact.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Runs the process and report stages on already-fetched records:
/// aggregate, render the prompt block, and ask the backend for a summary.
///
/// # Errors
///
/// Returns [`PipelineError`] if aggregation or the backend call fails.
pub async fn summarize(
    records: &[GeoRecord],
    provider: &dyn LlmProvider,
) -> Result<(Aggregate, Report), PipelineError> {
    let agg = aggregate(records)?;
    let data_block = format_for_prompt(records, &agg);

    log::info!(
        "Processed {} records, total population {}. Requesting {} summary...",
        records.len(),
        agg.total_population,
        provider.name()
    );

    let summary = provider
        .generate(SYSTEM_INSTRUCTION, &build_user_prompt(&data_block))
        .await?;

    Ok((agg, Report::new(summary)))
}

/// Runs the full pipeline: fetch, summarize, and write the Markdown
/// report to `output`.
///
/// # Errors
///
/// Returns [`PipelineError`] from the first failing stage.
pub async fn run(
    query: &AcsQuery,
    provider: &dyn LlmProvider,
    year: u16,
    output: &Path,
) -> Result<(), PipelineError> {
    let start = Instant::now();

    let records = query.fetch().await?;
    let (agg, report) = summarize(&records, provider).await?;

    let markdown = build_report_md(&records, &agg, &report, year);
    write_report(output, &markdown)?;

    log::info!(
        "Report written to {} in {:.1}s",
        output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
