//! Data module - CSV loading and world aggregation

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError, WorldAggregate};
pub use table::{ContinentSeries, ContinentTable, Row};
