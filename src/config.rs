use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "RUSTY_ALBUMS_CONFIG";

pub const DEFAULT_DATA_PATH: &str = "data/Album Ratings - Album Ratings.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a config file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Table loaded at startup.
    pub data_path: PathBuf,
    /// Genres selected when a dataset is first shown.
    pub default_genres: Vec<String>,
    /// Slider bounds for the year filter.
    pub year_bounds: (i64, i64),
    /// Initially selected year window.
    pub default_years: (i64, i64),
    pub chart_height: f32,
    /// Max height of per-row cover images.
    pub image_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_genres: ["Action", "Adventure", "Biography", "Comedy", "Drama", "Horror"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            year_bounds: (1986, 2016),
            default_years: (2000, 2016),
            chart_height: 320.0,
            image_height: 64.0,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig =
            serde_json::from_str(&text).context("parsing config JSON")?;
        Ok(config.normalized())
    }

    /// Config from the file named by [`CONFIG_ENV`], falling back to defaults
    /// (with a warning) if it is unset, unreadable or invalid.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                match Self::from_file(&path) {
                    Ok(config) => {
                        log::info!("Using config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!("Ignoring config: {e:#}");
                        Self::default()
                    }
                }
            }
            None => Self::default(),
        }
    }

    /// Order the bounds and clamp the default window into them.
    pub fn normalized(mut self) -> Self {
        let (lo, hi) = self.year_bounds;
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        self.year_bounds = (lo, hi);

        let (a, b) = self.default_years;
        let (a, b) = (a.min(b).clamp(lo, hi), a.max(b).clamp(lo, hi));
        self.default_years = (a, b);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "year_bounds": [1990, 2020] }"#).unwrap();
        assert_eq!(config.year_bounds, (1990, 2020));
        assert_eq!(config.default_years, (2000, 2016));
        assert_eq!(config.default_genres.len(), 6);
    }

    #[test]
    fn default_window_is_clamped_into_bounds() {
        let config = DashboardConfig {
            year_bounds: (2006, 1986),
            default_years: (2016, 2000),
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.year_bounds, (1986, 2006));
        assert_eq!(config.default_years, (2000, 2006));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(DashboardConfig::from_file(Path::new("no/such/config.json")).is_err());
    }
}
