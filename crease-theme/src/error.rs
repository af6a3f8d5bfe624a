//! # Metrics Error Types
//!
//! Errors raised while loading size scales, glyph width tables and metrics
//! configuration. The width estimator itself never fails; these only surface
//! from the configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading metrics configuration.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A configuration or glyph table file was not found.
    #[error("Metrics file not found: {path:?}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A configuration or glyph table file could not be parsed.
    #[error("Failed to parse metrics file {path:?}: {details}")]
    ParseError {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported metrics file format: {path:?} (expected .toml or .json)")]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// A size scale name was not recognised.
    #[error("Unknown size scale '{name}'")]
    UnknownScale {
        /// The name that failed to parse.
        name: String,
    },

    /// A glyph table contained an unusable width.
    #[error("Invalid glyph width {width} for {glyph:?}")]
    InvalidGlyphWidth {
        /// The glyph key as written in the table.
        glyph: String,
        /// The rejected width.
        width: f32,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for metrics operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

impl MetricsError {
    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an unknown scale error.
    pub fn unknown_scale(name: impl Into<String>) -> Self {
        Self::UnknownScale { name: name.into() }
    }
}
