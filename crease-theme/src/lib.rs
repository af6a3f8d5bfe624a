#![warn(missing_docs)]

//! # Crease Metrics
//!
//! Size scales, approximate text metrics and metrics configuration for the
//! crease overflow engine.
//!
//! - **[SizeScale](size::SizeScale)**: discrete item sizes mapped to pixel constants
//! - **[GlyphWidthTable](metrics::GlyphWidthTable)**: swappable per-glyph width table
//! - **[MetricsConfig](config::MetricsConfig)**: configuration from files and the environment
//! - **[MetricsError](error::MetricsError)**: errors raised while loading configuration
//!
//! ```rust
//! use crease_theme::metrics::GlyphWidthTable;
//! use crease_theme::size::SizeScale;
//!
//! let metrics = SizeScale::Normal.metrics();
//! let width = GlyphWidthTable::default().text_width("Documents", metrics.font_px);
//! assert!(width > 0.0);
//! ```

/// Contains the [MetricsConfig](config::MetricsConfig) struct.
pub mod config;

/// Contains the error types of this crate.
pub mod error;

/// Contains the approximate text metrics.
pub mod metrics;

/// Contains size scales and their pixel constants.
pub mod size;
