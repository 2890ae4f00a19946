use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::LoadCache;
use crate::data::model::{CellValue, Table};
use crate::data::pipeline::{
    artist_view, genre_view, ArtistSelection, ArtistView, GenreSelection, GenreView,
};
use crate::data::roles::{ColumnRole, ColumnRoles};
use crate::data::DataResult;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dashboard is shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Genre multiselect + year slider, pivot grid and line chart.
    #[default]
    Genres,
    /// Artist / album pickers, row table with covers and bar chart.
    Artists,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: LoadCache,

    /// Path of the table on screen.
    pub source: Option<PathBuf>,

    /// Loaded table (None until a file loads successfully).
    pub table: Option<Arc<Table>>,

    /// Column roles resolved for `table`.
    pub roles: ColumnRoles,

    pub mode: ViewMode,

    pub genre_selection: GenreSelection,
    pub artist_selection: ArtistSelection,

    /// Text typed into the artist/album search box.
    pub entity_search: String,

    /// Derived views, rebuilt by `recompute` after every widget change.
    pub genre_view: Option<DataResult<GenreView>>,
    pub artist_view: Option<ArtistView>,

    /// Series colours for genres and artists.
    pub genre_colors: ColorMap,
    pub artist_colors: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let (lo, hi) = config.default_years;
        Self {
            config,
            cache: LoadCache::new(),
            source: None,
            table: None,
            roles: ColumnRoles::default(),
            mode: ViewMode::default(),
            genre_selection: GenreSelection {
                genres: BTreeSet::new(),
                years: lo..=hi,
            },
            artist_selection: ArtistSelection::default(),
            entity_search: String::new(),
            genre_view: None,
            artist_view: None,
            genre_colors: ColorMap::default(),
            artist_colors: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load `path` through the cache. On failure the previous table stays on
    /// screen and the error goes to the status line.
    pub fn load(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(table) => self.set_table(path.to_path_buf(), table),
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.load(&path);
        }
    }

    /// Ingest a newly loaded table: resolve roles, reset widgets to their
    /// defaults, rebuild colours and views.
    pub fn set_table(&mut self, path: PathBuf, table: Arc<Table>) {
        self.roles = ColumnRoles::resolve(table.columns());
        log::info!("Column roles for {}: {:?}", path.display(), self.roles);
        for role in [ColumnRole::Key, ColumnRole::Category, ColumnRole::Measure] {
            if self.roles.get(role).is_none() {
                log::warn!("No {role} column in {}", path.display());
            }
        }

        let (lo, hi) = self.config.default_years;
        self.genre_selection = GenreSelection {
            genres: self
                .config
                .default_genres
                .iter()
                .map(|g| CellValue::Text(g.clone()))
                .collect(),
            years: lo..=hi,
        };
        self.artist_selection = ArtistSelection::default();

        self.genre_colors = self.colors_for(&table, ColumnRole::Category);
        self.artist_colors = self.colors_for(&table, ColumnRole::Artist);

        self.table = Some(table);
        self.source = Some(path);
        self.status_message = None;
        self.recompute();
    }

    fn colors_for(&self, table: &Table, role: ColumnRole) -> ColorMap {
        self.roles
            .get(role)
            .and_then(|col| table.unique_values(col))
            .map(|vals| ColorMap::new(vals))
            .unwrap_or_default()
    }

    /// Re-run the pipeline from the cached table.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let genres = genre_view(table, &self.roles, &self.genre_selection);
        if let Err(e) = &genres {
            log::warn!("Genre view skipped: {e}");
        }
        self.genre_view = Some(genres);
        self.artist_view = Some(artist_view(table, &self.roles, &self.artist_selection));
    }

    /// Distinct values of the column playing `role`.
    pub fn choices(&self, role: ColumnRole) -> Vec<CellValue> {
        match (&self.table, self.roles.get(role)) {
            (Some(table), Some(col)) => table
                .unique_values(col)
                .map(|vals| vals.iter().filter(|v| !v.is_null()).cloned().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Toggle a single genre in the multiselect.
    pub fn toggle_genre(&mut self, value: &CellValue) {
        toggle(&mut self.genre_selection.genres, value);
        self.recompute();
    }

    /// Select every genre present in the data.
    pub fn select_all_genres(&mut self) {
        self.genre_selection.genres = self.choices(ColumnRole::Category).into_iter().collect();
        self.recompute();
    }

    pub fn select_no_genres(&mut self) {
        self.genre_selection.genres.clear();
        self.recompute();
    }

    /// Set the year window, ordered and clamped to the slider bounds.
    pub fn set_years(&mut self, low: i64, high: i64) {
        let (min, max) = self.config.year_bounds;
        let (low, high) = (low.min(high).clamp(min, max), low.max(high).clamp(min, max));
        if self.genre_selection.years != (low..=high) {
            self.genre_selection.years = low..=high;
            self.recompute();
        }
    }

    pub fn toggle_artist(&mut self, value: &CellValue) {
        toggle(&mut self.artist_selection.artists, value);
        self.recompute();
    }

    pub fn toggle_album(&mut self, value: &CellValue) {
        toggle(&mut self.artist_selection.albums, value);
        self.recompute();
    }

    /// Drop artist and album selections (show everything).
    pub fn clear_entities(&mut self) {
        self.artist_selection = ArtistSelection::default();
        self.recompute();
    }
}

fn toggle(set: &mut BTreeSet<CellValue>, value: &CellValue) {
    if !set.remove(value) {
        set.insert(value.clone());
    }
}
