use eframe::egui::{self, Color32, Ui};

use crate::data::roles::ColumnRole;
use crate::state::AppState;

use super::{plot, table};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

fn warning(ui: &mut Ui, text: impl Into<String>) {
    ui.colored_label(Color32::YELLOW, format!("⚠ {}", text.into()));
}

/// Genre view: pivot grid, line chart, raw data preview.
pub fn genre_dashboard(ui: &mut Ui, state: &AppState) {
    let Some(loaded) = &state.table else {
        return;
    };

    ui.heading("Album scores by genre");
    ui.label("Summed score per year for the selected genres. Adjust the filters on the left.");
    ui.add_space(8.0);

    match &state.genre_view {
        Some(Ok(view)) => {
            if view.filtered.is_empty() {
                ui.label("No albums match the current filters.");
            }
            table::wide_grid(ui, &view.wide);
            ui.add_space(8.0);
            plot::line_chart(ui, &view.long, &state.genre_colors, state.config.chart_height);
        }
        Some(Err(e)) => warning(ui, format!("{e}; table and chart skipped.")),
        None => {}
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!("Raw data ({} rows)", loaded.len()))
        .id_salt("raw_preview")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::preview_table(ui, "raw_preview_table", loaded);
        });
}

/// Artist view: mean-rating bar chart and filtered rows with covers.
pub fn artist_dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.artist_view else {
        return;
    };

    ui.heading("Ratings by artist");
    ui.add_space(8.0);

    match &view.scores {
        Ok(scores) if scores.is_empty() => ui.label("No ratings for the current selection."),
        Ok(scores) => {
            let value_label = state.roles.get(ColumnRole::Measure).unwrap_or("rating");
            plot::bar_chart(
                ui,
                scores,
                value_label,
                &state.artist_colors,
                state.config.chart_height,
            );
            ui.label(format!("{} artists", scores.len()))
        }
        Err(e) => ui.colored_label(Color32::YELLOW, format!("⚠ {e}; rating chart skipped.")),
    };

    ui.add_space(8.0);
    ui.strong(format!("{} albums", view.filtered.len()));
    table::rows_with_covers(
        ui,
        &view.filtered,
        state.roles.get(ColumnRole::Image),
        state.config.image_height,
    );
}

/// Shown before any file has loaded.
pub fn empty_state(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        let hint = match &state.status_message {
            Some(_) => "Could not load the data file. Open another one  (File → Open…)",
            None => "Open a file to view album ratings  (File → Open…)",
        };
        ui.heading(hint);
    });
}
