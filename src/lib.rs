//! Album ratings dashboard: a CSV-backed filter → pivot → melt pipeline with
//! an egui front end.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
