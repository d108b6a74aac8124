//! Error types for gallery layout.

use std::path::PathBuf;

use lattice_gallery_core::ObjectError;

use crate::config::SettingsFormat;

/// Result type alias for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Errors that can occur outside the row bounds algorithm itself.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// A visual tree operation failed.
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// The layout loop still requested work after its pass limit.
    #[error("layout did not converge after {passes} passes")]
    LayoutNotConverged { passes: usize },

    /// Settings text could not be parsed.
    #[error("failed to parse {format} settings: {message}")]
    ConfigParse {
        format: SettingsFormat,
        message: String,
    },

    /// Settings could not be serialized.
    #[error("failed to serialize {format} settings: {message}")]
    ConfigSerialize {
        format: SettingsFormat,
        message: String,
    },

    /// A settings file could not be read or written.
    #[error("settings file '{}': {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file extension is neither `.toml` nor `.json`.
    #[error("unsupported settings file format: '{}'", .0.display())]
    UnsupportedConfigFormat(PathBuf),
}
