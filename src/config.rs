//! Application configuration
//! Fixed settings for the pipeline and the explicit figure style handed to the renderer.

use plotters::style::RGBColor;
use std::path::PathBuf;

/// Input file read from the working directory.
pub const DEFAULT_INPUT: &str = "data.csv";

/// Cyclic series palette: black, red, yellow, cyan, blue, green, magenta.
pub const SERIES_PALETTE: [RGBColor; 7] = [
    RGBColor(0, 0, 0),     // k
    RGBColor(255, 0, 0),   // r
    RGBColor(191, 191, 0), // y
    RGBColor(0, 191, 191), // c
    RGBColor(0, 0, 255),   // b
    RGBColor(0, 128, 0),   // g
    RGBColor(191, 0, 191), // m
];

/// Internet-user overlay line on the world panel (#0D0A28).
pub const OVERLAY_COLOR: RGBColor = RGBColor(13, 10, 40);

/// Figure styling. Passed by value into the renderer instead of living in global state.
#[derive(Debug, Clone)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    /// Base font size in pixels; titles and labels scale from it.
    pub font_size: f64,
    /// Vertical gap between panel rows, as a fraction of a row's height.
    pub hspace: f64,
    /// Horizontal gap between bottom panels, as a fraction of a panel's width.
    pub wspace: f64,
    pub palette: Vec<RGBColor>,
    pub overlay_color: RGBColor,
    /// Bar width in category slots.
    pub bar_width: f64,
    /// Multiplier on the tallest world bar for the top panel's y limit.
    pub y_headroom: f64,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 900,
            font_size: 14.0,
            hspace: 0.4,
            wspace: 0.15,
            palette: SERIES_PALETTE.to_vec(),
            overlay_color: OVERLAY_COLOR,
            bar_width: 0.8,
            y_headroom: 1.1,
        }
    }
}

impl FigureStyle {
    /// Color for the n-th series drawn in a panel.
    pub fn series_color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return SERIES_PALETTE[index % SERIES_PALETTE.len()];
        }
        self.palette[index % self.palette.len()]
    }

    pub fn title_font_size(&self) -> f64 {
        self.font_size * 1.2
    }

    pub fn label_font_size(&self) -> f64 {
        self.font_size
    }

    pub fn tick_font_size(&self) -> f64 {
        self.font_size * 0.85
    }
}

/// Settings for one run of the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub default_export_name: String,
    pub style: FigureStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            window_title: "World Population & Internet Users".to_string(),
            window_size: [1440.0, 960.0],
            min_window_size: [800.0, 560.0],
            default_export_name: "internet_growth.png".to_string(),
            style: FigureStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_after_seven_series() {
        let style = FigureStyle::default();
        assert_eq!(style.series_color(0), style.series_color(7));
        assert_eq!(style.series_color(3), style.series_color(10));
        assert_ne!(style.series_color(0), style.series_color(1));
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let style = FigureStyle {
            palette: Vec::new(),
            ..FigureStyle::default()
        };
        assert_eq!(style.series_color(1), SERIES_PALETTE[1]);
    }

    #[test]
    fn default_input_is_data_csv() {
        assert_eq!(AppConfig::default().input_path, PathBuf::from("data.csv"));
    }
}
