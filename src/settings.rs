//! User settings stored as JSON under the platform config directory
//! (`~/.config/aerohelper/settings.json` on Linux).
//!
//! A missing file is not an error; defaults are used and the file is written
//! the first time something changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::geometry::POINT_RADIUS;

pub const DEFAULT_CONVERTER_PROGRAM: &str = "color_converter";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed settings file '{path}': {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the last image opened in either tool.
    pub last_opened_dir: Option<PathBuf>,
    /// External program that remaps an image to a palette.
    pub converter_program: String,
    /// Hover/drag radius of vertex handles, in screen pixels.
    pub point_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_opened_dir: None,
            converter_program: DEFAULT_CONVERTER_PROGRAM.to_owned(),
            point_radius: POINT_RADIUS,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aerohelper").join(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.to_owned(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| SettingsError::Parse { path: path.to_owned(), source })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io { path: path.to_owned(), source };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|source| SettingsError::Parse { path: path.to_owned(), source })?;
        fs::write(path, text).map_err(io_err)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Remembers the directory containing `file`.
    pub fn remember_dir_of(&mut self, file: &Path) {
        self.last_opened_dir = file.parent().map(Path::to_path_buf);
    }
}

/// Settings together with the file they are persisted to.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pub settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn new(settings: Settings, path: Option<PathBuf>) -> Self {
        Self { settings, path }
    }

    /// Loads from `path`, falling back to defaults when the file is unreadable.
    pub fn load(path: Option<PathBuf>) -> Self {
        let settings = match path.as_deref().map(Settings::load_from) {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                tracing::warn!("{e}, using defaults");
                Settings::default()
            }
            None => Settings::default(),
        };
        Self { settings, path }
    }

    pub fn save(&self) {
        if let Some(path) = &self.path {
            if let Err(e) = self.settings.save_to(path) {
                tracing::warn!("{e}");
            }
        }
    }
}
