//! BGG Hotness - daily views history dashboard
//!
//! Desktop entry point: logging, configuration and the eframe window.

use bgg_hotness::config::{DashboardConfig, CONFIG_FILE};
use bgg_hotness::gui::HotnessApp;
use eframe::egui;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE));
    let title = config.window_title.clone();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title(&title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(HotnessApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with error: {e}"))
}
