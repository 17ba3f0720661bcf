#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population aggregation and prompt-block rendering.
//!
//! Turns a fetched record set into an [`Aggregate`] (total, top-5,
//! bottom-5) and renders a deterministic text block for the LLM prompt.
//! Sending only aggregates plus a compact table keeps token usage down
//! and front-loads the numbers the model should lead with.

pub mod aggregate;
pub mod format;

pub use aggregate::{Aggregate, RANK_COUNT, aggregate};
pub use format::format_for_prompt;

use thiserror::Error;

/// Errors that can occur during aggregation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No records were available to aggregate.
    #[error("No records to aggregate")]
    EmptyInput,
}
