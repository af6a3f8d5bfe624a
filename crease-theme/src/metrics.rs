//! # Approximate Text Metrics
//!
//! A [GlyphWidthTable] estimates rendered text width without a font or a
//! layout pass. Each glyph maps to a width relative to the font size (in em);
//! anything missing from the table falls back to the table's average width.
//!
//! Tables are plain data and can be loaded from TOML or JSON:
//!
//! ```toml
//! average = 0.55
//! inherit = true      # start from the built-in table
//!
//! [glyphs]
//! "W" = 0.95
//! "i" = 0.2
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

use crate::error::{MetricsError, MetricsResult};

/// Relative widths of printable ASCII (`' '..='~'`) in a regular sans-serif face.
const ASCII_WIDTHS: [f32; 95] = [
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, // space ! " # $ % & '
    0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278, // ( ) * + , - . /
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, // 0-7
    0.556, 0.556, 0.278, 0.278, 0.584, 0.584, 0.584, 0.556, // 8 9 : ; < = > ?
    1.015, 0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, // @ A-G
    0.722, 0.278, 0.500, 0.667, 0.556, 0.833, 0.722, 0.778, // H-O
    0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, // P-W
    0.667, 0.667, 0.611, 0.278, 0.278, 0.278, 0.469, 0.556, // X Y Z [ \ ] ^ _
    0.333, 0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, // ` a-g
    0.556, 0.222, 0.222, 0.500, 0.222, 0.833, 0.556, 0.556, // h-o
    0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, // p-w
    0.500, 0.500, 0.500, 0.334, 0.260, 0.334, 0.584, // x y z { | } ~
];

/// Fallback width in em for glyphs not in the table.
pub const DEFAULT_AVERAGE_WIDTH: f32 = 0.55;

/// Path reported in parse errors for tables parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

/// Width in em of East Asian wide and fullwidth glyphs.
const WIDE_GLYPH_WIDTH: f32 = 1.0;

/// Per-glyph relative width table.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphWidthTable {
    glyphs: HashMap<char, f32>,
    average: f32,
}

#[derive(Debug, Deserialize)]
struct GlyphTableFile {
    average: Option<f32>,
    #[serde(default = "default_inherit")]
    inherit: bool,
    #[serde(default)]
    glyphs: HashMap<String, f32>,
}

fn default_inherit() -> bool {
    true
}

impl GlyphWidthTable {
    /// Create an empty table where every glyph measures `average` em.
    pub fn empty(average: f32) -> Self {
        Self {
            glyphs: HashMap::new(),
            average: sanitize(average).unwrap_or(DEFAULT_AVERAGE_WIDTH),
        }
    }

    /// The average glyph width in em.
    pub fn average(&self) -> f32 {
        self.average
    }

    /// Set or replace the width of a single glyph.
    pub fn with_glyph(mut self, glyph: char, width: f32) -> Self {
        if let Some(width) = sanitize(width) {
            self.glyphs.insert(glyph, width);
        }
        self
    }

    /// Width of a glyph in em.
    pub fn glyph_width(&self, glyph: char) -> f32 {
        if let Some(width) = self.glyphs.get(&glyph) {
            return *width;
        }

        match glyph.width() {
            Some(0) => 0.0,
            Some(2) => WIDE_GLYPH_WIDTH,
            _ => self.average,
        }
    }

    /// Estimated width of `text` in pixels at `font_px`.
    ///
    /// Text that sums to nothing, either empty or made only of zero-width
    /// glyphs, measures one average glyph so that spacing never collapses.
    pub fn text_width(&self, text: &str, font_px: f32) -> f32 {
        let em: f32 = text.chars().map(|c| self.glyph_width(c)).sum();
        if em > 0.0 {
            em * font_px
        } else {
            self.average * font_px
        }
    }

    /// Parse a table from TOML source.
    pub fn from_toml_str(source: &str) -> MetricsResult<Self> {
        Self::parse_toml(source, Path::new(INLINE_SOURCE))
    }

    /// Parse a table from JSON source.
    pub fn from_json_str(source: &str) -> MetricsResult<Self> {
        Self::parse_json(source, Path::new(INLINE_SOURCE))
    }

    /// Load a table from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> MetricsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MetricsError::file_not_found(path));
        }

        let source = fs::read_to_string(path)?;
        match extension(path).as_deref() {
            Some("toml") => Self::parse_toml(&source, path),
            Some("json") => Self::parse_json(&source, path),
            _ => Err(MetricsError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn parse_toml(source: &str, origin: &Path) -> MetricsResult<Self> {
        let file: GlyphTableFile =
            toml::from_str(source).map_err(|e| MetricsError::parse_error(origin, e.to_string()))?;
        Self::from_file_data(file, origin)
    }

    fn parse_json(source: &str, origin: &Path) -> MetricsResult<Self> {
        let file: GlyphTableFile = serde_json::from_str(source)
            .map_err(|e| MetricsError::parse_error(origin, e.to_string()))?;
        Self::from_file_data(file, origin)
    }

    fn from_file_data(file: GlyphTableFile, origin: &Path) -> MetricsResult<Self> {
        let mut table = if file.inherit {
            Self::default()
        } else {
            Self::empty(DEFAULT_AVERAGE_WIDTH)
        };

        if let Some(average) = file.average {
            table.average = sanitize(average).ok_or_else(|| MetricsError::InvalidGlyphWidth {
                glyph: "average".to_string(),
                width: average,
            })?;
        }

        for (key, width) in file.glyphs {
            let mut chars = key.chars();
            let glyph = match (chars.next(), chars.next()) {
                (Some(glyph), None) => glyph,
                _ => {
                    return Err(MetricsError::parse_error(
                        origin,
                        format!("glyph key {key:?} must be a single character"),
                    ))
                }
            };
            let width =
                sanitize(width).ok_or(MetricsError::InvalidGlyphWidth { glyph: key, width })?;
            table.glyphs.insert(glyph, width);
        }

        Ok(table)
    }
}

impl Default for GlyphWidthTable {
    /// The built-in sans-serif table covering printable ASCII.
    fn default() -> Self {
        let glyphs = (b' '..=b'~')
            .zip(ASCII_WIDTHS)
            .map(|(byte, width)| (byte as char, width))
            .collect();

        Self {
            glyphs,
            average: DEFAULT_AVERAGE_WIDTH,
        }
    }
}

/// Lowercased file extension, used to pick a parser.
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn sanitize(width: f32) -> Option<f32> {
    (width.is_finite() && width >= 0.0).then_some(width)
}
