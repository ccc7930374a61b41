//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::AreaUnit;

use crate::i18n::Lang;
use crate::state::notifications::DEFAULT_TOAST_SECONDS;

/// Grid overlay appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    /// Line color RGB
    pub color: [u8; 3],
    /// Line opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Line width in points
    pub width: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 255],
            opacity: 0.3,
            width: 1.0,
        }
    }
}

/// Room outline appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Edge and vertex color RGB
    pub color: [u8; 3],
    /// Fill opacity for convex outlines (0 disables the fill)
    pub fill_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            fill_opacity: 0.1,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// How long a notification stays visible, in seconds
    pub toast_seconds: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            toast_seconds: DEFAULT_TOAST_SECONDS,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// UI language
    #[serde(default)]
    pub language: Lang,
    /// Unit preselected in the area input
    #[serde(default)]
    pub default_unit: AreaUnit,
    #[serde(default)]
    pub grid: GridStyle,
    #[serde(default)]
    pub polygon: PolygonStyle,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "floorscale", "floorscale")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load from an explicit path; unreadable or malformed files give defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings: {e}");
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
