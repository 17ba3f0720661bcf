//! Population ranking and totals.

use census_report_acs_models::GeoRecord;

use crate::AnalyticsError;

/// Number of records in each of the top and bottom rankings.
pub const RANK_COUNT: usize = 5;

/// Derived summary of a record set.
///
/// `top_n` and `bottom_n` may overlap when there are fewer than
/// `2 * RANK_COUNT` records; the overlap is preserved rather than
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Sum of all populations.
    pub total_population: u64,
    /// Up to [`RANK_COUNT`] records, descending by population.
    pub top_n: Vec<GeoRecord>,
    /// Up to [`RANK_COUNT`] records, ascending by population.
    pub bottom_n: Vec<GeoRecord>,
}

/// Computes the aggregate for a record set.
///
/// Both rankings use stable sorts, so records with equal populations keep
/// their original response order.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyInput`] if `records` is empty.
pub fn aggregate(records: &[GeoRecord]) -> Result<Aggregate, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let total_population = records.iter().map(|r| r.population).sum();

    let mut ascending: Vec<GeoRecord> = records.to_vec();
    ascending.sort_by_key(|r| r.population);

    let mut descending: Vec<GeoRecord> = records.to_vec();
    descending.sort_by(|a, b| b.population.cmp(&a.population));

    let n = RANK_COUNT.min(records.len());
    ascending.truncate(n);
    descending.truncate(n);

    Ok(Aggregate {
        total_population,
        top_n: descending,
        bottom_n: ascending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, population: u64, fips: &str) -> GeoRecord {
        GeoRecord::new(name.to_owned(), population, fips.to_owned())
    }

    fn sample() -> Vec<GeoRecord> {
        vec![
            record("Alabama", 5_028_092, "01"),
            record("Alaska", 734_821, "02"),
            record("Arizona", 7_172_282, "04"),
            record("Arkansas", 3_018_669, "05"),
            record("California", 39_356_104, "06"),
            record("Colorado", 5_770_790, "08"),
        ]
    }

    #[test]
    fn total_is_sum_of_populations() {
        let agg = aggregate(&sample()).unwrap();
        assert_eq!(agg.total_population, 61_080_758);
    }

    #[test]
    fn total_is_permutation_invariant() {
        let mut reversed = sample();
        reversed.reverse();
        let a = aggregate(&sample()).unwrap();
        let b = aggregate(&reversed).unwrap();
        assert_eq!(a.total_population, b.total_population);
    }

    #[test]
    fn top_is_descending_bottom_is_ascending() {
        let agg = aggregate(&sample()).unwrap();
        assert!(
            agg.top_n
                .windows(2)
                .all(|w| w[0].population >= w[1].population)
        );
        assert!(
            agg.bottom_n
                .windows(2)
                .all(|w| w[0].population <= w[1].population)
        );
        assert_eq!(agg.top_n[0].name, "California");
        assert_eq!(agg.bottom_n[0].name, "Alaska");
    }

    #[test]
    fn rankings_are_capped_at_five() {
        let agg = aggregate(&sample()).unwrap();
        assert_eq!(agg.top_n.len(), 5);
        assert_eq!(agg.bottom_n.len(), 5);
    }

    #[test]
    fn small_sets_rank_every_record() {
        let records = vec![record("Alabama", 5_028_092, "01"), record("Alaska", 734_821, "02")];
        let agg = aggregate(&records).unwrap();
        assert_eq!(agg.total_population, 5_762_913);
        assert_eq!(agg.top_n[0].name, "Alabama");
        assert_eq!(agg.top_n[1].name, "Alaska");
        assert_eq!(agg.bottom_n[0].name, "Alaska");
        assert_eq!(agg.bottom_n[1].name, "Alabama");
    }

    #[test]
    fn overlap_under_ten_records_is_preserved() {
        let records = vec![
            record("Alabama", 5_028_092, "01"),
            record("Alaska", 734_821, "02"),
            record("Arizona", 7_172_282, "04"),
        ];
        let agg = aggregate(&records).unwrap();
        // With 3 records both rankings contain all of them.
        assert_eq!(agg.top_n.len(), 3);
        assert_eq!(agg.bottom_n.len(), 3);
        assert!(agg.top_n.iter().any(|r| r.name == "Alaska"));
        assert!(agg.bottom_n.iter().any(|r| r.name == "Arizona"));
    }

    #[test]
    fn ties_keep_original_order() {
        let records = vec![
            record("First", 100, "01"),
            record("Second", 100, "02"),
            record("Third", 100, "03"),
        ];
        let agg = aggregate(&records).unwrap();
        let names: Vec<&str> = agg.top_n.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        let names: Vec<&str> = agg.bottom_n.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            aggregate(&[]).unwrap_err(),
            crate::AnalyticsError::EmptyInput
        ));
    }
}
