//! CSV Data Loader Module
//! Reads the population CSV with Polars and groups its rows by continent.

use super::table::{ContinentTable, Row};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONTINENT_COL: &str = "continent";
pub const YEAR_COL: &str = "year";
pub const TOTAL_POPULATION_COL: &str = "total_population";
pub const INTERNET_POPULATION_COL: &str = "internet_population";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Csv(#[from] PolarsError),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: empty value in column '{column}'")]
    EmptyValue { column: &'static str, line: usize },
}

/// Loads `continent,year,total_population,internet_population` CSV files.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file from disk.
    ///
    /// The file handle is owned by the reader and closed on every return path.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<ContinentTable, LoaderError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening population CSV");

        let file = File::open(path).map_err(|source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        Self::load_from_reader(file)
    }

    /// Parse CSV content from any seekable byte source.
    pub fn load_from_reader<R: MmapBytesReader>(reader: R) -> Result<ContinentTable, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_schema_overwrite(Some(Arc::new(Self::column_schema())))
            .into_reader_with_file_handle(reader)
            .finish()
            .map_err(ParseError::from)?;

        let table = Self::table_from_frame(&df)?;
        info!(
            rows = table.row_count(),
            continents = table.len(),
            "loaded population data"
        );
        if table.is_empty() {
            warn!("population CSV has no data rows");
        }
        debug!(continents = ?table.continents(), "continents in first-seen order");
        Ok(table)
    }

    /// Required columns with the dtypes they must parse as. Other columns keep inferred types.
    fn column_schema() -> Schema {
        let mut schema = Schema::default();
        schema.with_column(CONTINENT_COL.into(), DataType::String);
        schema.with_column(YEAR_COL.into(), DataType::Int64);
        schema.with_column(TOTAL_POPULATION_COL.into(), DataType::Int64);
        schema.with_column(INTERNET_POPULATION_COL.into(), DataType::Int64);
        schema
    }

    fn table_from_frame(df: &DataFrame) -> Result<ContinentTable, ParseError> {
        let continents = df
            .column(CONTINENT_COL)
            .map_err(|_| ParseError::MissingColumn(CONTINENT_COL))?
            .str()?;
        let years = Self::int_column(df, YEAR_COL)?;
        let totals = Self::int_column(df, TOTAL_POPULATION_COL)?;
        let internet = Self::int_column(df, INTERNET_POPULATION_COL)?;

        // Build into a local table so a failing row never leaks a partial result.
        let mut table = ContinentTable::new();
        let rows = continents
            .into_iter()
            .zip(years.into_iter())
            .zip(totals.into_iter())
            .zip(internet.into_iter());

        for (i, (((continent, year), total), users)) in rows.enumerate() {
            // +1 for the header, +1 for 1-based lines
            let line = i + 2;
            table.push_row(Row {
                // Polars reads an empty text cell as null; it is still a valid key.
                continent: continent.unwrap_or_default().to_string(),
                year: Self::required(year, YEAR_COL, line)?,
                total_population: Self::required(total, TOTAL_POPULATION_COL, line)?,
                internet_population: Self::required(users, INTERNET_POPULATION_COL, line)?,
            });
        }

        Ok(table)
    }

    fn int_column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Int64Chunked, ParseError> {
        let column = df
            .column(name)
            .map_err(|_| ParseError::MissingColumn(name))?;
        Ok(column.i64()?)
    }

    fn required<T>(value: Option<T>, column: &'static str, line: usize) -> Result<T, ParseError> {
        value.ok_or(ParseError::EmptyValue { column, line })
    }
}
