mod app;
mod catalog;
mod config;
mod curriculum;
mod layout;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::app::HeatmapOrdering;
use crate::catalog::load_catalog;
use crate::config::LayoutConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Course catalog XML with prerequisites.
    #[arg(long)]
    catalog: PathBuf,
    /// Grade export CSV (student id, then class/grade/attendance column triples).
    #[arg(long)]
    grades: PathBuf,
    /// JSON file overriding spacing and box sizes.
    #[arg(long)]
    layout_config: Option<PathBuf>,
    /// Initial order of the grade heatmap cells.
    #[arg(long, value_enum, default_value_t = HeatmapOrdering::Descending)]
    ordering: HeatmapOrdering,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.layout_config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };
    let catalog = load_catalog(&args.catalog, &args.grades)?;
    log::info!("{} grade records ready", catalog.record_count());

    let catalog_name = args
        .catalog
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.catalog.display().to_string());
    let ordering = args.ordering;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1600.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Curriculum map",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CurriculumApp::new(
                cc,
                catalog,
                catalog_name,
                config,
                ordering,
            )))
        }),
    )
    .map_err(|error| anyhow!("window closed with an error: {error}"))?;

    log::info!("window closed");
    Ok(())
}
