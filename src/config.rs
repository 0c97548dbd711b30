use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screen::MenuConfig;

pub const DEFAULT_CONFIG_PATH: &str = "flickergrid.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    /// Edge length of one grid cell in pixels.
    pub tile_size: u32,
    pub target_fps: u32,
    pub title: String,
    pub mask_path: PathBuf,
    /// Font for menu labels. Common system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
    /// Fixed RNG seed; wall-clock seconds when unset.
    pub seed: Option<u64>,
    pub menu: MenuConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            tile_size: 5,
            target_fps: 60,
            title: "pov: brain is weird".to_string(),
            mask_path: PathBuf::from("resources/dvd.pbm"),
            font_path: None,
            seed: None,
            menu: MenuConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    /// Loads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Using config file {}", path.display());
            Self::load(path)
        } else {
            log::info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid("tile_size must be positive".into()));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be positive".into()));
        }
        if self.window_width < self.tile_size || self.window_height < self.tile_size {
            return Err(ConfigError::Invalid(format!(
                "a {}x{} window cannot hold a {}px tile",
                self.window_width, self.window_height, self.tile_size
            )));
        }
        if self.menu.rows == 0 || self.menu.cols == 0 {
            return Err(ConfigError::Invalid(
                "menu needs at least one row and one column".into(),
            ));
        }
        Ok(())
    }

    pub fn grid_cols(&self) -> usize {
        (self.window_width / self.tile_size) as usize
    }

    pub fn grid_rows(&self) -> usize {
        (self.window_height / self.tile_size) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_an_800x600_window() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_cols(), 160);
        assert_eq!(config.grid_rows(), 120);
        assert_eq!(config.menu.cols * config.menu.rows, 6);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = Config::from_json(
            r#"{ "tile_size": 10, "seed": 42, "menu": { "rows": 1 } }"#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.tile_size, 10);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.menu.rows, 1);
        assert_eq!(config.menu.cols, 3);
        assert_eq!(config.window_width, 800);
        assert_eq!(config.grid_cols(), 80);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_json(r#"{ "tile_size": 0 }"#, "inline"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "window_width": 3 }"#, "inline"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "tile_size": "big" }"#, "inline"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flickergrid.json");
        fs::write(&path, r#"{ "target_fps": 30, "mask_path": "logo.pbm" }"#).unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.mask_path, PathBuf::from("logo.pbm"));
    }
}
