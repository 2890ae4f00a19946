use eframe::egui;

use rusty_albums::app::RustyAlbumsApp;
use rusty_albums::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Albums – Album Ratings",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch cover art from URLs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(RustyAlbumsApp::new(config)))
        }),
    )
}
