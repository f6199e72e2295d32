//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{AxisKind, SelectionState, UnknownFieldError, ViewId, ViewMode};

/// Errors raised while reading the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Happiness report table
    pub table_path: PathBuf,

    /// Country boundary collection
    pub geometry_path: PathBuf,

    /// Directory holding the toggle button icons
    pub assets_dir: PathBuf,

    /// Whether to open the window full screen
    pub start_fullscreen: bool,

    /// View mounted at startup
    pub initial_view: ViewMode,

    /// Whether hover tooltips start enabled
    pub tooltips_enabled: bool,

    /// Initial field choices per view
    pub views: ViewFieldSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("WHR2023.csv"),
            geometry_path: PathBuf::from("world_map.json"),
            assets_dir: PathBuf::from("Icons"),
            start_fullscreen: true,
            initial_view: ViewMode::Map,
            tooltips_enabled: true,
            views: ViewFieldSettings::default(),
        }
    }
}

/// Field names per view, validated when applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewFieldSettings {
    pub map: FieldChoice,
    pub bubble: FieldChoice,
    pub brush_left: FieldChoice,
    pub brush_right: FieldChoice,
}

/// Optional field names for one view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldChoice {
    pub x: Option<String>,
    pub y: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl AppSettings {
    /// Default settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "whr-explorer.toml";

    /// Parse settings from TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Read settings if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            info!("Loading settings from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Push the configured field choices into the selection state
    pub fn apply_view_fields(&self, selection: &SelectionState) -> Result<(), UnknownFieldError> {
        let views = [
            (ViewId::Map, &self.views.map),
            (ViewId::Bubble, &self.views.bubble),
            (ViewId::BrushLeft, &self.views.brush_left),
            (ViewId::BrushRight, &self.views.brush_right),
        ];

        for (view, choice) in views {
            let slots = [
                (AxisKind::X, &choice.x),
                (AxisKind::Y, &choice.y),
                (AxisKind::Size, &choice.size),
                (AxisKind::Color, &choice.color),
            ];
            for (kind, name) in slots {
                if let Some(name) = name {
                    selection.set_view_field(view, kind, name)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use std::io::Write;

    #[test]
    fn test_defaults_open_map_full_screen() {
        let settings = AppSettings::default();
        assert_eq!(settings.table_path, PathBuf::from("WHR2023.csv"));
        assert_eq!(settings.initial_view, ViewMode::Map);
        assert!(settings.start_fullscreen);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = AppSettings::from_toml(
            r#"
            initial_view = "linked_brushing"
            tooltips_enabled = false

            [views.brush_right]
            x = "Generosity"
            "#,
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(settings.initial_view, ViewMode::LinkedBrushing);
        assert!(!settings.tooltips_enabled);
        assert_eq!(settings.geometry_path, PathBuf::from("world_map.json"));
        assert_eq!(settings.views.brush_right.x.as_deref(), Some("Generosity"));
    }

    #[test]
    fn test_apply_view_fields() {
        let mut settings = AppSettings::default();
        settings.views.map.color = Some("social_support".to_string());
        let selection = SelectionState::new();

        settings.apply_view_fields(&selection).unwrap();
        assert_eq!(selection.view_fields(ViewId::Map).color, Field::SocialSupport);
    }

    #[test]
    fn test_apply_unknown_field_fails() {
        let mut settings = AppSettings::default();
        settings.views.bubble.x = Some("Shoe size".to_string());
        let err = settings.apply_view_fields(&SelectionState::new()).unwrap_err();
        assert_eq!(err.name, "Shoe size");
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(AppSettings::FILE_NAME);
        assert!(AppSettings::load_or_default(&missing).unwrap().tooltips_enabled);

        let mut file = std::fs::File::create(&missing).unwrap();
        writeln!(file, "start_fullscreen = false").unwrap();
        assert!(!AppSettings::load_or_default(&missing).unwrap().start_fullscreen);

        std::fs::write(&missing, "start_fullscreen = \"maybe\"").unwrap();
        assert!(matches!(
            AppSettings::load_or_default(&missing),
            Err(SettingsError::Parse { .. })
        ));
    }
}
