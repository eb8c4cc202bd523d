mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::PriceDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    log::info!("Using dataset {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard Indeks Harga Industri Domestik",
        options,
        Box::new(|_cc| Ok(Box::new(PriceDashboardApp::new(config)))),
    )
}
