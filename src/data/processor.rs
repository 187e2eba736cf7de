//! Data Processor Module
//! Folds the "World" series into fixed-size year buckets for the top panel.

use super::table::ContinentTable;
use thiserror::Error;
use tracing::{info, warn};

/// Continent whose rows feed the bucketed world panel.
pub const WORLD_KEY: &str = "World";

/// Consecutive rows combined into one bucket.
pub const WORLD_BUCKET_SIZE: usize = 3;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("continent '{0}' not found in data")]
    MissingKey(String),
}

/// World totals grouped into buckets of up to [`WORLD_BUCKET_SIZE`] rows.
///
/// `labels`, `population` and `internet_users` are parallel: one entry per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldAggregate {
    pub labels: Vec<String>,
    pub population: Vec<i64>,
    pub internet_users: Vec<i64>,
}

impl WorldAggregate {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest bucketed population, or `None` when there are no buckets.
    pub fn max_population(&self) -> Option<i64> {
        self.population.iter().copied().max()
    }
}

/// Aggregation over a loaded [`ContinentTable`].
pub struct DataProcessor;

impl DataProcessor {
    /// Bucket the "World" series into groups of three consecutive rows.
    ///
    /// The bucket starting at row `i` is labelled `"{year[i]}-{year[i + 2]}"`
    /// with `i + 2` indexing the whole series, and sums population and
    /// internet users over the bucket's own rows. The last bucket may hold
    /// one or two rows.
    pub fn aggregate_world(table: &ContinentTable) -> Result<WorldAggregate, ProcessorError> {
        let world = table
            .get(WORLD_KEY)
            .ok_or_else(|| ProcessorError::MissingKey(WORLD_KEY.to_string()))?;

        let years = world.years();
        let totals = world.total_population();
        let internet = world.internet_population();

        let bucket_count = years.len().div_ceil(WORLD_BUCKET_SIZE);
        let mut aggregate = WorldAggregate {
            labels: Vec::with_capacity(bucket_count),
            population: Vec::with_capacity(bucket_count),
            internet_users: Vec::with_capacity(bucket_count),
        };

        for start in (0..years.len()).step_by(WORLD_BUCKET_SIZE) {
            let end = (start + WORLD_BUCKET_SIZE).min(years.len());

            aggregate.labels.push(Self::bucket_label(years, start, end));
            aggregate.population.push(totals[start..end].iter().sum());
            aggregate.internet_users.push(internet[start..end].iter().sum());
        }

        info!(
            rows = years.len(),
            buckets = aggregate.len(),
            "aggregated world series"
        );
        Ok(aggregate)
    }

    /// Label for the bucket covering `years[start..end]`.
    ///
    /// When slot `start + 2` is past the end of the series (a short final
    /// bucket), the label ends at the bucket's last year instead of aborting
    /// the run on the missing slot.
    fn bucket_label(years: &[i64], start: usize, end: usize) -> String {
        let nominal_end = start + WORLD_BUCKET_SIZE - 1;
        let end_year = match years.get(nominal_end) {
            Some(year) => *year,
            None => {
                let last = years[end - 1];
                warn!(
                    start_year = years[start],
                    fallback_year = last,
                    "world series length is not a multiple of {WORLD_BUCKET_SIZE}; \
                     final bucket label ends at its last year"
                );
                last
            }
        };
        format!("{}-{}", years[start], end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Row;

    fn world_table(years: &[i64], totals: &[i64], internet: &[i64]) -> ContinentTable {
        years
            .iter()
            .zip(totals)
            .zip(internet)
            .map(|((&year, &total), &users)| Row {
                continent: WORLD_KEY.to_string(),
                year,
                total_population: total,
                internet_population: users,
            })
            .collect()
    }

    #[test]
    fn sums_full_buckets_of_three() {
        let table = world_table(
            &[1991, 1994, 1997, 2000, 2003, 2006],
            &[1, 2, 3, 4, 5, 6],
            &[10, 20, 30, 40, 50, 60],
        );

        let agg = DataProcessor::aggregate_world(&table).expect("world present");

        assert_eq!(agg.labels, vec!["1991-1997", "2000-2006"]);
        assert_eq!(agg.population, vec![6, 15]);
        assert_eq!(agg.internet_users, vec![60, 150]);
    }

    #[test]
    fn label_uses_series_slot_two_ahead() {
        let table = world_table(&[2000, 2001, 2002], &[1, 1, 1], &[0, 0, 0]);
        let agg = DataProcessor::aggregate_world(&table).expect("world present");
        assert_eq!(agg.labels, vec!["2000-2002"]);
    }

    #[test]
    fn partial_final_bucket_sums_remaining_rows() {
        let table = world_table(
            &[1991, 1994, 1997, 2000, 2003],
            &[1, 2, 3, 4, 5],
            &[1, 1, 1, 7, 8],
        );

        let agg = DataProcessor::aggregate_world(&table).expect("world present");

        assert_eq!(agg.len(), 2);
        assert_eq!(agg.population, vec![6, 9]);
        assert_eq!(agg.internet_users, vec![3, 15]);
        assert_eq!(agg.labels[1], "2000-2003");
    }

    #[test]
    fn single_row_final_bucket() {
        let table = world_table(&[1991, 1994, 1997, 2000], &[1, 2, 3, 4], &[0, 0, 0, 2]);
        let agg = DataProcessor::aggregate_world(&table).expect("world present");
        assert_eq!(agg.population, vec![6, 4]);
        assert_eq!(agg.internet_users, vec![0, 2]);
        assert_eq!(agg.labels[1], "2000-2000");
    }

    #[test]
    fn bucket_count_is_ceil_of_rows_over_three() {
        for n in 1..10usize {
            let years: Vec<i64> = (0..n as i64).map(|i| 1990 + i).collect();
            let ones = vec![1; n];
            let table = world_table(&years, &ones, &ones);

            let agg = DataProcessor::aggregate_world(&table).expect("world present");
            assert_eq!(agg.len(), n.div_ceil(3));
            assert_eq!(agg.population.iter().sum::<i64>(), n as i64);
        }
    }

    #[test]
    fn single_row_world_series() {
        let mut table = ContinentTable::new();
        table.push_row(Row {
            continent: WORLD_KEY.to_string(),
            year: 1991,
            total_population: 1,
            internet_population: 0,
        });
        let agg = DataProcessor::aggregate_world(&table).expect("world present");
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.labels, vec!["1991-1991"]);
    }

    #[test]
    fn missing_world_is_a_missing_key_error() {
        let table: ContinentTable = std::iter::once(Row {
            continent: "Asia".to_string(),
            year: 1991,
            total_population: 100,
            internet_population: 1,
        })
        .collect();

        let err = DataProcessor::aggregate_world(&table).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingKey(ref key) if key == "World"));
    }

    #[test]
    fn aggregation_is_repeatable() {
        let table = world_table(&[1991, 1994, 1997, 2000], &[5, 6, 7, 8], &[1, 2, 3, 4]);
        let first = DataProcessor::aggregate_world(&table).expect("first");
        let second = DataProcessor::aggregate_world(&table).expect("second");
        assert_eq!(first, second);
    }
}
