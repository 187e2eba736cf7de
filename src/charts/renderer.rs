//! Static Chart Renderer
//! Draws the figure into an in-memory RGB bitmap with plotters.
//!
//! Layout (2x2 grid, top row spanning both columns):
//! 1. Top: world population bars (viridis gradient) + internet users overlay line
//! 2. Bottom-left: internet users by continent
//! 3. Bottom-right: population by continent

use super::figure::{format_count, ContinentPanel, FigureModel, MarkerShape, WorldPanel};
use crate::config::FigureStyle;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Horizontal slices per bar.
const GRADIENT_STEPS: usize = 64;

/// Viridis anchor colors at 0, 0.25, 0.5, 0.75 and 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Figure has zero size ({0}x{1})")]
    EmptyFigure(u32, u32),
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub struct FigureRenderer;

impl FigureRenderer {
    /// Render the whole figure into an RGB image of `style.width` x `style.height`.
    pub fn render(model: &FigureModel, style: &FigureStyle) -> Result<RgbImage, RenderError> {
        let (width, height) = (style.width, style.height);
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFigure(width, height));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_figure(&root, model, style)
                .and_then(|_| root.present())
                .map_err(|e| RenderError::Drawing(e.to_string()))?;
        }

        debug!(width, height, "rendered figure");
        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::EmptyFigure(width, height))
    }

    /// Write a rendered figure to disk as PNG.
    pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), RenderError> {
        image.save_with_format(path, ImageFormat::Png)?;
        info!(path = %path.display(), "exported figure");
        Ok(())
    }

    fn draw_figure<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        model: &FigureModel,
        style: &FigureStyle,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let (width, height) = root.dim_in_pixel();
        let row_height = height / 2;
        let column_width = width / 2;

        // Gaps sit between whole plot areas, captions and tick labels included.
        let v_gap = (style.hspace * row_height as f64 * 0.25).round() as i32;
        let h_gap = (style.wspace * column_width as f64 * 0.25).round() as i32;

        let (top, bottom) = root.split_vertically(row_height);
        let top = top.margin(0, v_gap / 2, 0, 0);
        let bottom = bottom.margin(v_gap / 2, 0, 0, 0);
        let (left, right) = bottom.split_horizontally(column_width);
        let left = left.margin(0, 0, 0, h_gap / 2);
        let right = right.margin(0, 0, h_gap / 2, 0);

        Self::draw_world_panel(&top, &model.world, style)?;
        Self::draw_continent_panel(&left, &model.internet, style)?;
        Self::draw_continent_panel(&right, &model.population, style)?;
        Ok(())
    }

    fn draw_world_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &WorldPanel,
        style: &FigureStyle,
    ) -> DrawResult<DB> {
        // One unit per slot, bar centres on the integers.
        let slots = panel.labels.len().max(1);
        let x_spec = -0.5f64..(slots as f64 - 0.5);

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, style.title_font_size()))
            .margin(10)
            .x_label_area_size((style.font_size * 6.0) as u32)
            .y_label_area_size((style.font_size * 5.0) as u32)
            .build_cartesian_2d(x_spec, 0f64..panel.y_max)?;

        let tick_font = FontDesc::new(FontFamily::SansSerif, style.tick_font_size(), FontStyle::Normal);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .x_label_formatter(&|x| panel.label_at(*x))
            .y_label_formatter(&|y| format_count(*y))
            .x_label_style(tick_font.clone().transform(FontTransform::Rotate90))
            .y_label_style(tick_font)
            .axis_desc_style((FONT, style.label_font_size()))
            .draw()?;

        let half = style.bar_width / 2.0;
        let ramp = bar_gradient(GRADIENT_STEPS);
        for (i, &value) in panel.bars.iter().enumerate() {
            let x = i as f64;
            let step = value / GRADIENT_STEPS as f64;
            chart.draw_series(ramp.iter().enumerate().map(|(k, color)| {
                let low = step * k as f64;
                Rectangle::new([(x - half, low), (x + half, low + step)], color.filled())
            }))?;
        }

        let overlay = panel.overlay_points();
        let line_color = style.overlay_color;
        chart.draw_series(LineSeries::new(overlay.iter().copied(), line_color.stroke_width(2)))?;
        chart.draw_series(
            overlay
                .iter()
                .map(|&point| Circle::new(point, 3, line_color.filled())),
        )?;

        Ok(())
    }

    fn draw_continent_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &ContinentPanel,
        style: &FigureStyle,
    ) -> DrawResult<DB> {
        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, style.title_font_size()))
            .margin(10)
            .x_label_area_size((style.font_size * 3.0) as u32)
            .y_label_area_size((style.font_size * 5.0) as u32)
            .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

        chart
            .configure_mesh()
            .x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format_count(*y))
            .label_style((FONT, style.tick_font_size()))
            .axis_desc_style((FONT, style.label_font_size()))
            .draw()?;

        for line in &panel.lines {
            let color = line.color;
            chart
                .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
                .label(line.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            match panel.marker {
                MarkerShape::Circle => {
                    chart.draw_series(
                        line.points
                            .iter()
                            .map(|&point| Circle::new(point, 3, color.filled())),
                    )?;
                }
                MarkerShape::Octagon => {
                    chart.draw_series(
                        line.points
                            .iter()
                            .map(|&point| EmptyElement::at(point) + octagon(4, color.filled())),
                    )?;
                }
            }
        }

        if !panel.lines.is_empty() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.3))
                .label_font((FONT, style.tick_font_size()))
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;
        }

        Ok(())
    }
}

/// Regular octagon marker of circumradius `radius` pixels, centred on the origin.
fn octagon(radius: i32, style: ShapeStyle) -> Polygon<(i32, i32)> {
    let r = radius as f64;
    let corners = (0..8)
        .map(|k| {
            let angle = std::f64::consts::FRAC_PI_8 + k as f64 * std::f64::consts::FRAC_PI_4;
            ((r * angle.cos()).round() as i32, (r * angle.sin()).round() as i32)
        })
        .collect::<Vec<_>>();
    Polygon::new(corners, style)
}

/// Sample the viridis ramp at `t` in [0, 1].
pub fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lower = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - lower as f64;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Bar fill colors from the base slice upwards: yellow at the base, dark purple at the top.
pub fn bar_gradient(steps: usize) -> Vec<RGBColor> {
    (0..steps)
        .map(|k| {
            let from_base = (k as f64 + 0.5) / steps as f64;
            viridis(1.0 - from_base)
        })
        .collect()
}
