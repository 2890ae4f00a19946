use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Table, WideTable};

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Generic grid
// ---------------------------------------------------------------------------

/// Draw a scrollable, striped grid. `cell(ui, row, col)` renders one cell.
fn grid(
    ui: &mut Ui,
    id: &str,
    headers: &[String],
    n_rows: usize,
    row_height: f32,
    mut cell: impl FnMut(&mut Ui, usize, usize),
) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0).clip(true), headers.len())
            .header(ROW_HEIGHT, |mut header| {
                for name in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, n_rows, |mut row| {
                    let r = row.index();
                    for c in 0..headers.len() {
                        row.col(|ui: &mut Ui| cell(ui, r, c));
                    }
                });
            });
    });
}

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public tables
// ---------------------------------------------------------------------------

/// Plain view of a loaded or filtered table.
pub fn preview_table(ui: &mut Ui, id: &str, table: &Table) {
    grid(ui, id, table.columns(), table.len(), ROW_HEIGHT, |ui, r, c| {
        ui.label(cell_text(&table.rows()[r].values[c]));
    });
}

/// Pivot grid: the key column is rendered as plain text (no digit grouping),
/// followed by one column per category.
pub fn wide_grid(ui: &mut Ui, wide: &WideTable) {
    let headers: Vec<String> = std::iter::once(wide.key_column.clone())
        .chain(wide.categories.iter().map(|c| c.to_string()))
        .collect();

    grid(ui, "wide_grid", &headers, wide.len(), ROW_HEIGHT, |ui, r, c| {
        let row = &wide.rows[r];
        if c == 0 {
            ui.label(row.key.to_string());
        } else {
            ui.label(format!("{}", row.values[c - 1]));
        }
    });
}

/// Filtered rows with the cover column (if any) drawn as images.
pub fn rows_with_covers(ui: &mut Ui, table: &Table, image_column: Option<&str>, image_height: f32) {
    let image_idx = image_column.and_then(|name| table.column_index(name));
    let row_height = if image_idx.is_some() {
        image_height.max(ROW_HEIGHT)
    } else {
        ROW_HEIGHT
    };

    grid(ui, "entity_rows", table.columns(), table.len(), row_height, |ui, r, c| {
        let value = &table.rows()[r].values[c];
        match (Some(c) == image_idx, value.as_str()) {
            (true, Some(uri)) if looks_like_image_uri(uri) => {
                ui.add(
                    egui::Image::from_uri(uri.to_string())
                        .max_height(image_height)
                        .maintain_aspect_ratio(true),
                );
            }
            _ => {
                ui.label(cell_text(value));
            }
        }
    });
}

/// Whether a cell can be handed to egui's image loaders.
pub fn looks_like_image_uri(s: &str) -> bool {
    let s = s.trim();
    ["http://", "https://", "file://", "bytes://"]
        .iter()
        .any(|scheme| s.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_loader_schemes_are_images() {
        assert!(looks_like_image_uri("https://example.com/kid-a.png"));
        assert!(looks_like_image_uri(" file:///tmp/cover.jpg"));
        assert!(!looks_like_image_uri("Kid A"));
        assert!(!looks_like_image_uri(""));
    }
}
