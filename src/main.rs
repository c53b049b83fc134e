mod app;
mod config;
mod draw;
mod export;
mod geo;
mod map;
mod util;
mod waypoints;

use app::MissionApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let initial_drawing_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Missionmap",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(MissionApp::new_with_initial_path(
                &cc.egui_ctx,
                initial_drawing_path.as_deref(),
            )))
        }),
    )
}
