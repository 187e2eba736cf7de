//! Figure Model
//! Pure description of the three drawn panels, built from the loaded data.
//! The renderer only turns this into pixels.

use crate::config::FigureStyle;
use crate::data::{ContinentSeries, ContinentTable, WorldAggregate};
use plotters::style::RGBColor;
use std::ops::Range;

pub const WORLD_TITLE: &str = "World Population Growth & Internet Users 1991-2020";
pub const INTERNET_TITLE: &str = "Internet Users Growth by Continent";
pub const POPULATION_TITLE: &str = "Population Growth by Continent";

/// Marker drawn on every point of a continent line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Octagon,
}

/// Panel A: bucketed world population bars with the internet-user overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Category labels, one per bar slot.
    pub labels: Vec<String>,
    pub bars: Vec<f64>,
    pub overlay: Vec<f64>,
    pub y_max: f64,
}

impl WorldPanel {
    fn build(aggregate: &WorldAggregate, style: &FigureStyle) -> Self {
        let y_max = match aggregate.max_population() {
            Some(max) if max > 0 => max as f64 * style.y_headroom,
            _ => 1.0,
        };

        Self {
            title: WORLD_TITLE.to_string(),
            x_label: "Years".to_string(),
            y_label: "Population".to_string(),
            labels: aggregate.labels.clone(),
            bars: aggregate.population.iter().map(|&v| v as f64).collect(),
            overlay: aggregate.internet_users.iter().map(|&v| v as f64).collect(),
            y_max,
        }
    }

    /// Overlay points at the bar slot positions.
    pub fn overlay_points(&self) -> Vec<(f64, f64)> {
        self.overlay
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect()
    }

    /// Category label for an x coordinate, empty between slots.
    pub fn label_at(&self, x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        self.labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// One continent line in panel B or C.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentLine {
    pub name: String,
    pub color: RGBColor,
    /// (year, value) in CSV insertion order.
    pub points: Vec<(f64, f64)>,
}

/// Panels B and C: one line per continent.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub marker: MarkerShape,
    pub lines: Vec<ContinentLine>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl ContinentPanel {
    fn build<F>(
        table: &ContinentTable,
        style: &FigureStyle,
        title: &str,
        y_label: &str,
        marker: MarkerShape,
        values: F,
    ) -> Self
    where
        F: Fn(&ContinentSeries) -> &[i64],
    {
        // Palette slots follow table order, so an omitted continent still uses up its color.
        let lines: Vec<ContinentLine> = table
            .iter()
            .enumerate()
            .filter(|(_, series)| !series.is_empty())
            .map(|(idx, series)| ContinentLine {
                name: series.continent().to_string(),
                color: style.series_color(idx),
                points: series
                    .years()
                    .iter()
                    .zip(values(series))
                    .map(|(&year, &value)| (year as f64, value as f64))
                    .collect(),
            })
            .collect();

        let (x_range, y_range) = Self::data_ranges(&lines);

        Self {
            title: title.to_string(),
            x_label: "Year".to_string(),
            y_label: y_label.to_string(),
            marker,
            lines,
            x_range,
            y_range,
        }
    }

    fn data_ranges(lines: &[ContinentLine]) -> (Range<f64>, Range<f64>) {
        let points = lines.iter().flat_map(|line| line.points.iter());

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (0.0f64, f64::NEG_INFINITY);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if !x_min.is_finite() {
            return (0.0..1.0, 0.0..1.0);
        }
        if x_max - x_min < 1.0 {
            x_min -= 1.0;
            x_max += 1.0;
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }

        let y_pad = (y_max - y_min) * 0.05;
        (x_min..x_max, y_min..(y_max + y_pad))
    }
}

/// Everything the renderer needs to draw the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureModel {
    pub world: WorldPanel,
    pub internet: ContinentPanel,
    pub population: ContinentPanel,
}

impl FigureModel {
    pub fn build(table: &ContinentTable, aggregate: &WorldAggregate, style: &FigureStyle) -> Self {
        Self {
            world: WorldPanel::build(aggregate, style),
            internet: ContinentPanel::build(
                table,
                style,
                INTERNET_TITLE,
                "Internet users (billions)",
                MarkerShape::Circle,
                ContinentSeries::internet_population,
            ),
            population: ContinentPanel::build(
                table,
                style,
                POPULATION_TITLE,
                "Population (billions)",
                MarkerShape::Octagon,
                ContinentSeries::total_population,
            ),
        }
    }
}

/// Short tick label for a head count, e.g. `7.8B`, `450M`, `12K`.
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}
