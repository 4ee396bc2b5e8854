mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::DashboardApp;
use color::ChartColors;
use config::{Cli, Settings};
use data::source::{FileSource, TableCache};
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    // The table must load before any UI is shown.
    let source = FileSource::new(settings.data_path.clone(), settings.loader.clone());
    let state = AppState::new(TableCache::new(Box::new(source)), settings.loader.clone())
        .inspect_err(|e| log::error!("Failed to load data: {e:#}"))
        .with_context(|| format!("loading {}", settings.data_path.display()))?;

    let colors = ChartColors::from_hex(&settings.bar_color).unwrap_or_else(|| {
        log::warn!("Invalid bar colour {:?}, using default", settings.bar_color);
        ChartColors::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state, colors)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
