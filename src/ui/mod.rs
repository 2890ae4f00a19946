/// egui widgets: filter panels, tables and charts.
pub mod dashboard;
pub mod panels;
pub mod plot;
pub mod table;
