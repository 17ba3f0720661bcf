#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census Data API client for ACS population queries.
//!
//! Issues a single GET against the ACS 5-year endpoint and parses the
//! JSON array response (header row + data rows) into
//! [`GeoRecord`](census_report_acs_models::GeoRecord)s. There is
//! deliberately no retry loop: a transient upstream failure is surfaced
//! to the caller, not masked.

pub mod client;
pub mod parse;

pub use client::AcsQuery;
pub use parse::parse_response;

use thiserror::Error;

/// Errors that can occur when querying the Census Data API.
#[derive(Debug, Error)]
pub enum AcsError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Census API returned a non-2xx status.
    #[error("Census API returned HTTP {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Response body was not valid JSON or had fewer than two rows.
    #[error("Malformed Census response: {message}")]
    MalformedResponse {
        /// Description of what went wrong.
        message: String,
    },

    /// The header row is missing an expected column.
    #[error("Census response missing expected column '{column}'")]
    SchemaMismatch {
        /// The column that was expected but absent.
        column: String,
    },
}
