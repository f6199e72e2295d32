//! Happiness report explorer entry point

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use whr_core::{AppSettings, SelectionState};
use whr_views::ViewerContext;

mod app;
mod assets;

use app::ExplorerApp;

const DEFAULT_LOG_FILTER: &str = "warn,whr_explorer=info,whr_core=info,whr_data=info,whr_views=info,whr_ui=info";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = AppSettings::load_or_default(Path::new(AppSettings::FILE_NAME))
        .context("Failed to read settings")?;

    let dataset = match whr_data::load(&settings.table_path, &settings.geometry_path) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!("Failed to load data: {err}");
            return Err(err).context("Could not load the happiness report data");
        }
    };
    info!(
        "Loaded {} countries, {} with boundaries",
        dataset.len(),
        dataset.mapped_count()
    );

    let selection = Arc::new(SelectionState::new());
    settings
        .apply_view_fields(&selection)
        .context("Invalid field name in settings")?;

    let viewer = ViewerContext::new(Arc::new(dataset), selection);
    {
        let mut options = viewer.options.write();
        options.tooltips_enabled = settings.tooltips_enabled;
        options.toggle_icons = assets::find_toggle_icons(&settings.assets_dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_fullscreen(settings.start_fullscreen),
        default_theme: eframe::Theme::Light,
        persist_window: false,
        ..Default::default()
    };

    let initial = settings.initial_view;
    info!("Starting in {}", initial.label());
    eframe::run_native(
        "World Happiness Report 2023",
        options,
        Box::new(move |cc| Box::new(ExplorerApp::new(cc, viewer, initial))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
