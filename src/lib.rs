pub mod api;
pub mod app;
pub mod models;
pub mod session;

use eframe::{self, egui};

pub use app::TorridApp;

/// Launches the egui application with default window options.
pub fn run_app() -> Result<(), eframe::Error> {
    run_app_with_options(default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_app_with_options(options: eframe::NativeOptions) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "Torrid",
        options,
        Box::new(|cc| Ok(Box::new(TorridApp::new(cc)))),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    }
}
