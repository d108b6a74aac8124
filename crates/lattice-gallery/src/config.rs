//! Serializable row layout settings.
//!
//! [`RowLayoutSettings`] captures every setting of an
//! [`AdaptiveRowContainer`](crate::widget::AdaptiveRowContainer) so a gallery
//! can be configured from a TOML or JSON file:
//!
//! ```toml
//! orientation = "horizontal"
//! item_width = 96.0
//! min_items_per_row = 2
//! max_items_per_row = 6
//! ```
//!
//! Omitted keys take their defaults. An omitted `max_items_per_row` means
//! unbounded.

use std::fmt;
use std::path::Path;

use lattice_gallery_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};
use crate::widget::Orientation;

/// Settings for an adaptive row container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLayoutSettings {
    /// Whether the group header is shown.
    pub show_grouping: bool,
    /// The wrap axis.
    pub orientation: Orientation,
    /// Fixed item width, replacing the measured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_width: Option<f32>,
    /// Fixed item height, replacing the measured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_height: Option<f32>,
    /// Lower bound on items per row.
    pub min_items_per_row: usize,
    /// Upper bound on items per row. `None` is unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items_per_row: Option<usize>,
}

impl Default for RowLayoutSettings {
    fn default() -> Self {
        Self {
            show_grouping: true,
            orientation: Orientation::Horizontal,
            item_width: None,
            item_height: None,
            min_items_per_row: 0,
            max_items_per_row: None,
        }
    }
}

/// File formats settings can be read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl SettingsFormat {
    /// Pick a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

impl fmt::Display for SettingsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

impl RowLayoutSettings {
    /// Parse settings from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| GalleryError::ConfigParse {
            format: SettingsFormat::Toml,
            message: e.to_string(),
        })
    }

    /// Parse settings from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| GalleryError::ConfigParse {
            format: SettingsFormat::Json,
            message: e.to_string(),
        })
    }

    /// Serialize settings to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GalleryError::ConfigSerialize {
            format: SettingsFormat::Toml,
            message: e.to_string(),
        })
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GalleryError::ConfigSerialize {
            format: SettingsFormat::Json,
            message: e.to_string(),
        })
    }

    /// Load settings from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)
            .ok_or_else(|| GalleryError::UnsupportedConfigFormat(path.to_path_buf()))?;
        let source = std::fs::read_to_string(path).map_err(|source| GalleryError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(target: targets::CONFIG, path = %path.display(), %format, "loading row layout settings");
        match format {
            SettingsFormat::Toml => Self::from_toml_str(&source),
            SettingsFormat::Json => Self::from_json_str(&source),
        }
    }

    /// Save settings to a `.toml` or `.json` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = match SettingsFormat::from_path(path) {
            Some(SettingsFormat::Toml) => self.to_toml_string()?,
            Some(SettingsFormat::Json) => self.to_json_string()?,
            None => return Err(GalleryError::UnsupportedConfigFormat(path.to_path_buf())),
        };
        std::fs::write(path, contents).map_err(|source| GalleryError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }
}
