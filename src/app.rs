use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, ViewMode};
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyAlbumsApp {
    pub state: AppState,
}

impl RustyAlbumsApp {
    /// Create the app and load the configured data file. A failed load is
    /// reported in the top bar; the user can pick another file.
    pub fn new(config: DashboardConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load(&data_path);
        Self { state }
    }
}

impl eframe::App for RustyAlbumsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: grid + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                dashboard::empty_state(ui, &self.state);
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.mode {
                    ViewMode::Genres => dashboard::genre_dashboard(ui, &self.state),
                    ViewMode::Artists => dashboard::artist_dashboard(ui, &self.state),
                });
        });
    }
}
