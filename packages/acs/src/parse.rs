//! Census response parsing.
//!
//! The Census Data API returns a JSON array where row 0 holds column
//! names and every following row is an array of strings. Columns are
//! located by exact name match so a reshaped response fails loudly
//! instead of silently misreading fields.

use census_report_acs_models::GeoRecord;

use crate::AcsError;

/// Column name for the geography label.
const NAME_COLUMN: &str = "NAME";

/// Column name for the state FIPS code appended by the `for=state:` filter.
const GEOGRAPHY_COLUMN: &str = "state";

/// Parses a raw response body string into records.
///
/// # Errors
///
/// Returns [`AcsError::MalformedResponse`] if the body is not valid JSON,
/// or [`AcsError::SchemaMismatch`] if an expected column is absent.
pub fn parse_body(body: &str, population_variable: &str) -> Result<Vec<GeoRecord>, AcsError> {
    let raw: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AcsError::MalformedResponse {
            message: format!("not valid JSON: {e}"),
        })?;
    parse_response(&raw, population_variable)
}

/// Parses an already-decoded JSON value into records, preserving row order.
///
/// # Errors
///
/// Returns [`AcsError::MalformedResponse`] if the value is not an array
/// with a header row and at least one data row, or
/// [`AcsError::SchemaMismatch`] if an expected column is absent.
pub fn parse_response(
    raw: &serde_json::Value,
    population_variable: &str,
) -> Result<Vec<GeoRecord>, AcsError> {
    let rows = raw.as_array().ok_or_else(|| AcsError::MalformedResponse {
        message: "response is not a JSON array".to_owned(),
    })?;

    if rows.len() < 2 {
        return Err(AcsError::MalformedResponse {
            message: format!(
                "expected a header row and at least one data row, got {} row(s)",
                rows.len()
            ),
        });
    }

    let header: Vec<&str> = rows[0]
        .as_array()
        .map(|cols| cols.iter().filter_map(serde_json::Value::as_str).collect())
        .unwrap_or_default();

    let name_idx = column_index(&header, NAME_COLUMN)?;
    let pop_idx = column_index(&header, population_variable)?;
    let geo_idx = column_index(&header, GEOGRAPHY_COLUMN)?;

    let mut records = Vec::with_capacity(rows.len() - 1);
    for row in &rows[1..] {
        let cells = row.as_array().ok_or_else(|| AcsError::MalformedResponse {
            message: "data row is not a JSON array".to_owned(),
        })?;

        let name = cell_str(cells, name_idx).trim().to_owned();
        let fips_code = cell_str(cells, geo_idx).trim().to_owned();
        let population = parse_population(cell_str(cells, pop_idx));

        records.push(GeoRecord::new(name, population, fips_code));
    }

    Ok(records)
}

/// Finds a column by exact name match.
fn column_index(header: &[&str], column: &str) -> Result<usize, AcsError> {
    header
        .iter()
        .position(|c| *c == column)
        .ok_or_else(|| AcsError::SchemaMismatch {
            column: column.to_owned(),
        })
}

/// Returns the cell at `idx` as a string, or `""` if missing or non-string.
fn cell_str(cells: &[serde_json::Value], idx: usize) -> &str {
    cells
        .get(idx)
        .and_then(serde_json::Value::as_str)
        .unwrap_or("")
}

/// Parses the population string. Empty or unparsable values coerce to 0
/// so a single bad cell does not drop the row.
fn parse_population(s: &str) -> u64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        log::warn!("Unparsable population value '{trimmed}', coercing to 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!([
            ["NAME", "B01001_001E", "state"],
            ["Alabama", "5028092", "01"],
            ["Alaska", "734821", "02"]
        ])
    }

    #[test]
    fn parses_header_and_rows() {
        let records = parse_response(&sample(), "B01001_001E").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alabama");
        assert_eq!(records[0].population, 5_028_092);
        assert_eq!(records[0].fips_code, "01");
        assert_eq!(records[1].name, "Alaska");
    }

    #[test]
    fn preserves_response_row_order() {
        let raw = serde_json::json!([
            ["NAME", "B01001_001E", "state"],
            ["Alaska", "734821", "02"],
            ["Alabama", "5028092", "01"]
        ]);
        let records = parse_response(&raw, "B01001_001E").unwrap();
        assert_eq!(records[0].name, "Alaska");
        assert_eq!(records[1].name, "Alabama");
    }

    #[test]
    fn missing_population_column_is_schema_mismatch() {
        let raw = serde_json::json!([["NAME", "state"], ["Alabama", "01"]]);
        let err = parse_response(&raw, "B01001_001E").unwrap_err();
        assert!(matches!(
            err,
            AcsError::SchemaMismatch { column } if column == "B01001_001E"
        ));
    }

    #[test]
    fn header_only_is_malformed() {
        let raw = serde_json::json!([["NAME", "B01001_001E", "state"]]);
        let err = parse_response(&raw, "B01001_001E").unwrap_err();
        assert!(matches!(err, AcsError::MalformedResponse { .. }));
    }

    #[test]
    fn non_array_body_is_malformed() {
        let err = parse_body("{\"error\": \"nope\"}", "B01001_001E").unwrap_err();
        assert!(matches!(err, AcsError::MalformedResponse { .. }));
    }

    #[test]
    fn invalid_json_is_malformed_not_panic() {
        let err = parse_body("<html>blocked</html>", "B01001_001E").unwrap_err();
        assert!(matches!(err, AcsError::MalformedResponse { .. }));
    }

    #[test]
    fn unparsable_population_coerces_to_zero() {
        let raw = serde_json::json!([
            ["NAME", "B01001_001E", "state"],
            ["Nowhere", "not-a-number", "99"],
            ["Empty", "", "98"]
        ]);
        let records = parse_response(&raw, "B01001_001E").unwrap();
        assert_eq!(records[0].population, 0);
        assert_eq!(records[1].population, 0);
    }
}
