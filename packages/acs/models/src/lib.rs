#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census geography record types and state FIPS utilities.
//!
//! These types represent one row of a Census Data API response (a named
//! geography with a population estimate) plus the FIPS lookup tables used
//! to build geography filters. They carry no HTTP or aggregation logic.

pub mod fips;

use serde::{Deserialize, Serialize};

/// Default ACS vintage year queried when none is specified.
pub const DEFAULT_YEAR: u16 = 2022;

/// ACS variable code for total population estimate.
pub const POPULATION_VARIABLE: &str = "B01001_001E";

/// One row of Census data: a named geography with its population estimate.
///
/// Immutable after creation; the population has already been converted
/// from the API's string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    /// Geography label (e.g. "Alabama").
    pub name: String,
    /// Total population estimate.
    pub population: u64,
    /// Zero-padded FIPS geography identifier (e.g. "01").
    pub fips_code: String,
}

impl GeoRecord {
    /// Creates a new `GeoRecord`.
    #[must_use]
    pub const fn new(name: String, population: u64, fips_code: String) -> Self {
        Self {
            name,
            population,
            fips_code,
        }
    }
}
