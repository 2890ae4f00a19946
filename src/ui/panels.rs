use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::CellValue;
use crate::data::roles::ColumnRole;
use crate::state::{AppState, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the active view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.mode {
            ViewMode::Genres => genre_filters(ui, state),
            ViewMode::Artists => entity_filters(ui, state),
        });
}

fn genre_filters(ui: &mut Ui, state: &mut AppState) {
    let genres = state.choices(ColumnRole::Category);
    if genres.is_empty() {
        ui.colored_label(Color32::YELLOW, "⚠ No genre column in this file.");
    } else {
        let n_selected = genres
            .iter()
            .filter(|g| state.genre_selection.genres.contains(*g))
            .count();
        let header_text = format!("Genres  ({n_selected}/{})", genres.len());

        egui::CollapsingHeader::new(RichText::new(header_text).strong())
            .id_salt("genres")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_genres();
                    }
                    if ui.small_button("None").clicked() {
                        state.select_no_genres();
                    }
                });

                for genre in &genres {
                    let mut checked = state.genre_selection.genres.contains(genre);
                    let text = RichText::new(genre.to_string())
                        .color(state.genre_colors.color_for(genre));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_genre(genre);
                    }
                }
            });
    }

    ui.separator();
    ui.strong("Years");

    let (min, max) = state.config.year_bounds;
    let mut low = *state.genre_selection.years.start();
    let mut high = *state.genre_selection.years.end();
    let from = ui.add(egui::Slider::new(&mut low, min..=max).text("from"));
    let to = ui.add(egui::Slider::new(&mut high, min..=max).text("to"));
    if from.changed() || to.changed() {
        state.set_years(low, high);
    }
}

fn entity_filters(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::TextEdit::singleline(&mut state.entity_search).hint_text("Search…"));
        if ui.small_button("Clear").clicked() {
            state.entity_search.clear();
            state.clear_entities();
        }
    });
    ui.separator();

    let needle = state.entity_search.to_lowercase();
    for role in [ColumnRole::Artist, ColumnRole::Album] {
        let choices = state.choices(role);
        if choices.is_empty() {
            ui.colored_label(Color32::YELLOW, format!("⚠ No {role} column in this file."));
            continue;
        }

        let (title, selected) = match role {
            ColumnRole::Artist => ("Artists", &state.artist_selection.artists),
            _ => ("Albums", &state.artist_selection.albums),
        };
        let header_text = format!("{title}  ({} selected)", selected.len());

        let header = egui::CollapsingHeader::new(RichText::new(header_text).strong());
        let picked: Vec<CellValue> = header
            .id_salt(title)
            .default_open(role == ColumnRole::Artist)
            .show(ui, |ui: &mut Ui| {
                choices
                    .iter()
                    .filter(|v| {
                        needle.is_empty() || v.to_string().to_lowercase().contains(&needle)
                    })
                    .filter_map(|v| {
                        let mut checked = selected.contains(v);
                        ui.checkbox(&mut checked, v.to_string())
                            .changed()
                            .then(|| v.clone())
                    })
                    .collect::<Vec<_>>()
            })
            .body_returned
            .unwrap_or_default();

        for value in &picked {
            match role {
                ColumnRole::Artist => state.toggle_artist(value),
                _ => state.toggle_album(value),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.mode, ViewMode::Genres, "Genres by year");
        ui.selectable_value(&mut state.mode, ViewMode::Artists, "Artists");

        ui.separator();

        if let Some(table) = &state.table {
            let shown = match state.mode {
                ViewMode::Genres => state
                    .genre_view
                    .as_ref()
                    .and_then(|v| v.as_ref().ok())
                    .map(|v| v.filtered.len()),
                ViewMode::Artists => state.artist_view.as_ref().map(|v| v.filtered.len()),
            };
            match shown {
                Some(n) => ui.label(format!("{} rows loaded, {n} shown", table.len())),
                None => ui.label(format!("{} rows loaded", table.len())),
            };
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open album ratings")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
