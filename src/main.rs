//! Internet Growth Charts - World population & internet users figure
//!
//! Loads `data.csv`, buckets the world series, and shows a four-panel chart.

mod charts;
mod config;
mod data;
mod gui;
mod pipeline;

use anyhow::{anyhow, Context, Result};
use charts::FigureRenderer;
use config::AppConfig;
use eframe::egui;
use gui::PopulationApp;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = AppConfig::default();
    info!(input = %config.input_path.display(), "starting");

    let prepared = pipeline::prepare(&config.input_path, &config.style)
        .with_context(|| format!("failed to prepare data from {}", config.input_path.display()))?;
    let figure = FigureRenderer::render(&prepared.model, &config.style)
        .context("failed to render figure")?;
    let status = prepared.summary();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config.window_title.as_str()),
        ..Default::default()
    };

    let export_name = config.default_export_name.clone();
    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |cc| Ok(Box::new(PopulationApp::new(cc, figure, export_name, status)))),
    )
    .map_err(|e| anyhow!("viewer failed: {}", e))
}
