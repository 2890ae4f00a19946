use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::model::{CellValue, LongTable};
use crate::data::pipeline::line_series;
use crate::data::reshape::GroupValue;

/// Label for a nominal axis position, blank between categories.
fn nominal_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Line chart: summed score per year, one series per genre
// ---------------------------------------------------------------------------

/// x = key as a nominal axis, y = value, one coloured line per category.
pub fn line_chart(ui: &mut Ui, long: &LongTable, colors: &ColorMap, height: f32) {
    let lines = line_series(long);
    let labels: Vec<String> = lines.keys.iter().map(CellValue::to_string).collect();

    Plot::new("genre_line_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(long.key_column.clone())
        .y_axis_label(long.value_column.clone())
        .x_axis_formatter(move |mark, _range| nominal_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (category, points) in lines.series {
                let line = Line::new(PlotPoints::from(points))
                    .name(category.to_string())
                    .color(colors.color_for(&category))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal bar chart: mean rating per artist
// ---------------------------------------------------------------------------

/// One bar per group; `scores` is drawn top to bottom in the given order.
pub fn bar_chart(ui: &mut Ui, scores: &[GroupValue], value_label: &str, colors: &ColorMap, height: f32) {
    let n = scores.len();
    // egui_plot puts position 0 at the bottom, so the first entry gets n-1.
    let labels: Vec<String> = scores.iter().rev().map(|s| s.group.to_string()).collect();
    let bars: Vec<Bar> = scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new((n - 1 - i) as f64, s.value)
                .name(format!("{} ({} albums)", s.group, s.count))
                .fill(colors.color_for(&s.group))
        })
        .collect();

    Plot::new("artist_bar_chart")
        .height(height)
        .x_axis_label(format!("Mean {value_label}"))
        .y_axis_formatter(move |mark, _range| nominal_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.6));
        });
}
