//! GUI module - Figure viewer window

mod app;

pub use app::PopulationApp;
