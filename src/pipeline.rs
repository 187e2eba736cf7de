//! Pipeline
//! load -> aggregate -> figure model, run once per process.

use crate::charts::FigureModel;
use crate::config::FigureStyle;
use crate::data::{
    ContinentTable, DataLoader, DataProcessor, LoaderError, ProcessorError, WorldAggregate,
};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Aggregate(#[from] ProcessorError),
}

/// Everything computed from the input before drawing.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub table: ContinentTable,
    pub aggregate: WorldAggregate,
    pub model: FigureModel,
}

impl Prepared {
    /// One-line summary for the viewer's status bar.
    pub fn summary(&self) -> String {
        format!(
            "{} rows · {} continents · {} world buckets",
            self.table.row_count(),
            self.table.len(),
            self.aggregate.len()
        )
    }
}

/// Load the CSV at `path` and prepare the figure model.
pub fn prepare(path: &Path, style: &FigureStyle) -> Result<Prepared, PipelineError> {
    let table = DataLoader::load_csv(path)?;
    prepare_table(table, style)
}

/// Aggregate an already loaded table. Fails before any drawing when "World" is absent.
pub fn prepare_table(table: ContinentTable, style: &FigureStyle) -> Result<Prepared, PipelineError> {
    let aggregate = DataProcessor::aggregate_world(&table)?;
    if aggregate.is_empty() {
        warn!("world series is empty; panel A has no bars");
    }
    let model = FigureModel::build(&table, &aggregate, style);
    Ok(Prepared {
        table,
        aggregate,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CSV: &str = "\
continent,year,internet_population,total_population
World,1991,1,1
Africa,1991,0,10
World,1994,2,2
World,1997,3,3
World,2000,4,4
World,2003,5,5
World,2006,6,6
";

    fn table(text: &str) -> ContinentTable {
        DataLoader::load_from_reader(Cursor::new(text.as_bytes().to_vec())).expect("csv loads")
    }

    #[test]
    fn prepares_buckets_and_panels() {
        let prepared = prepare_table(table(CSV), &FigureStyle::default()).expect("prepared");

        assert_eq!(prepared.aggregate.population, vec![6, 15]);
        assert_eq!(prepared.aggregate.internet_users, vec![6, 15]);
        assert_eq!(prepared.aggregate.labels, vec!["1991-1997", "2000-2006"]);
        assert_eq!(prepared.model.world.bars, vec![6.0, 15.0]);
        assert_eq!(prepared.model.internet.lines.len(), 2);
    }

    #[test]
    fn missing_world_fails_before_any_figure_exists() {
        let csv = "continent,year,internet_population,total_population\nAsia,1991,1,2\n";
        let err = prepare_table(table(csv), &FigureStyle::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Aggregate(ProcessorError::MissingKey(_))));
    }

    #[test]
    fn missing_input_file_is_a_load_error() {
        let err = prepare(Path::new("no/such/dir/data.csv"), &FigureStyle::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoaderError::FileAccess { .. })));
    }

    #[test]
    fn running_twice_gives_identical_results() {
        let style = FigureStyle::default();
        let first = prepare_table(table(CSV), &style).expect("first");
        let second = prepare_table(table(CSV), &style).expect("second");

        assert_eq!(first.table, second.table);
        assert_eq!(first.aggregate, second.aggregate);
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn summary_counts_rows_continents_and_buckets() {
        let prepared = prepare_table(table(CSV), &FigureStyle::default()).expect("prepared");
        assert_eq!(prepared.summary(), "7 rows · 2 continents · 2 world buckets");
    }
}
