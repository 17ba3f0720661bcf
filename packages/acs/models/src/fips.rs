//! US state FIPS code utilities.
//!
//! Provides the state FIPS codes accepted by the Census Data API's
//! `for=state:...` geography filter, plus abbreviation lookup for display.

/// US state FIPS codes for the 50 states + DC.
pub const STATE_FIPS: &[&str] = &[
    "01", "02", "04", "05", "06", "08", "09", "10", "11", "12", "13", "15", "16", "17", "18", "19",
    "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32", "33", "34", "35",
    "36", "37", "38", "39", "40", "41", "42", "44", "45", "46", "47", "48", "49", "50", "51", "53",
    "54", "55", "56",
];

/// The 20-state subset queried by default (AL through MD in FIPS order).
pub const DEFAULT_STATE_FIPS: &[&str] = &[
    "01", "02", "04", "05", "06", "08", "09", "10", "11", "12", "13", "16", "17", "18", "19", "20",
    "21", "22", "23", "24",
];

/// Maps a two-digit FIPS code to the corresponding two-letter state
/// abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub fn state_abbr(fips: &str) -> &'static str {
    match fips {
        "01" => "AL",
        "02" => "AK",
        "04" => "AZ",
        "05" => "AR",
        "06" => "CA",
        "08" => "CO",
        "09" => "CT",
        "10" => "DE",
        "11" => "DC",
        "12" => "FL",
        "13" => "GA",
        "15" => "HI",
        "16" => "ID",
        "17" => "IL",
        "18" => "IN",
        "19" => "IA",
        "20" => "KS",
        "21" => "KY",
        "22" => "LA",
        "23" => "ME",
        "24" => "MD",
        "25" => "MA",
        "26" => "MI",
        "27" => "MN",
        "28" => "MS",
        "29" => "MO",
        "30" => "MT",
        "31" => "NE",
        "32" => "NV",
        "33" => "NH",
        "34" => "NJ",
        "35" => "NM",
        "36" => "NY",
        "37" => "NC",
        "38" => "ND",
        "39" => "OH",
        "40" => "OK",
        "41" => "OR",
        "42" => "PA",
        "44" => "RI",
        "45" => "SC",
        "46" => "SD",
        "47" => "TN",
        "48" => "TX",
        "49" => "UT",
        "50" => "VT",
        "51" => "VA",
        "53" => "WA",
        "54" => "WV",
        "55" => "WI",
        "56" => "WY",
        _ => "??",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_fips_to_abbr() {
        assert_eq!(state_abbr("01"), "AL");
        assert_eq!(state_abbr("11"), "DC");
        assert_eq!(state_abbr("56"), "WY");
    }

    #[test]
    fn unknown_fips_maps_to_placeholder() {
        assert_eq!(state_abbr("99"), "??");
    }

    #[test]
    fn default_subset_is_within_full_list() {
        for code in DEFAULT_STATE_FIPS {
            assert!(STATE_FIPS.contains(code), "{code} missing from STATE_FIPS");
        }
    }
}
