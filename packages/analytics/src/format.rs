//! Deterministic prompt-block rendering.
//!
//! The block is embedded verbatim into the LLM prompt, so the ordering is
//! fixed: totals first, then the top ranking, then the bottom ranking,
//! then the full table sorted descending by population. Report quality
//! depends on the key numbers coming before the bulk data.

use std::fmt::Write as _;

use census_report_acs_models::GeoRecord;

use crate::Aggregate;

/// Renders records plus their aggregate as a plain-text block.
#[must_use]
pub fn format_for_prompt(records: &[GeoRecord], agg: &Aggregate) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "State population (ACS 5-year estimates). Total: {} across {} geographies.",
        group_thousands(agg.total_population),
        records.len()
    );
    out.push('\n');

    out.push_str("Top by population:\n");
    for (i, r) in agg.top_n.iter().enumerate() {
        let _ = writeln!(out, "{}. {} - {}", i + 1, r.name, group_thousands(r.population));
    }
    out.push('\n');

    out.push_str("Bottom by population:\n");
    for (i, r) in agg.bottom_n.iter().enumerate() {
        let _ = writeln!(out, "{}. {} - {}", i + 1, r.name, group_thousands(r.population));
    }
    out.push('\n');

    out.push_str("All records:\n");
    out.push_str("| State | Population |\n");
    out.push_str("|-------|------------|\n");
    for r in sort_by_population(records) {
        let _ = writeln!(out, "| {} | {} |", r.name, group_thousands(r.population));
    }

    out
}

/// Returns the records sorted descending by population (stable, ties keep
/// original order). Tables are always rendered largest-first.
#[must_use]
pub fn sort_by_population(records: &[GeoRecord]) -> Vec<GeoRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.population.cmp(&a.population));
    sorted
}

/// Formats an integer with comma thousands separators (e.g. `5762913` ->
/// `"5,762,913"`).
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;

    fn records() -> Vec<GeoRecord> {
        vec![
            GeoRecord::new("Alabama".to_owned(), 5_028_092, "01".to_owned()),
            GeoRecord::new("Alaska".to_owned(), 734_821, "02".to_owned()),
        ]
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(5_762_913), "5,762,913");
        assert_eq!(group_thousands(330_000_000), "330,000,000");
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let recs = records();
        let agg = aggregate(&recs).unwrap();
        let block = format_for_prompt(&recs, &agg);

        let total = block.find("Total: 5,762,913").unwrap();
        let top = block.find("Top by population:").unwrap();
        let bottom = block.find("Bottom by population:").unwrap();
        let table = block.find("All records:").unwrap();

        assert!(total < top);
        assert!(top < bottom);
        assert!(bottom < table);
    }

    #[test]
    fn full_table_is_sorted_descending_by_population() {
        // Fetch order has the smaller state first; the table must not.
        let recs = vec![
            GeoRecord::new("Alaska".to_owned(), 734_821, "02".to_owned()),
            GeoRecord::new("Alabama".to_owned(), 5_028_092, "01".to_owned()),
        ];
        let agg = aggregate(&recs).unwrap();
        let block = format_for_prompt(&recs, &agg);

        let alabama = block.find("| Alabama | 5,028,092 |").unwrap();
        let alaska = block.find("| Alaska | 734,821 |").unwrap();
        assert!(alabama < alaska);
    }

    #[test]
    fn sorting_is_stable_for_ties() {
        let recs = vec![
            GeoRecord::new("First".to_owned(), 100, "01".to_owned()),
            GeoRecord::new("Second".to_owned(), 100, "02".to_owned()),
        ];
        let names: Vec<String> = sort_by_population(&recs).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn table_lists_every_record() {
        let recs = records();
        let agg = aggregate(&recs).unwrap();
        let block = format_for_prompt(&recs, &agg);

        assert!(block.contains("| Alabama | 5,028,092 |"));
        assert!(block.contains("| Alaska | 734,821 |"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let recs = records();
        let agg = aggregate(&recs).unwrap();
        assert_eq!(format_for_prompt(&recs, &agg), format_for_prompt(&recs, &agg));
    }
}
