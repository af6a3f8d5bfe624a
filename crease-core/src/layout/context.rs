// SPDX-License-Identifier: LGPL-3.0-only
use crease_theme::config::{MetricsConfig, DEFAULT_MORE_LABEL};
use crease_theme::error::MetricsResult;
use crease_theme::metrics::GlyphWidthTable;
use crease_theme::size::{SizeMetrics, SizeScale};
use std::sync::Arc;

/// Ambient parameters for width estimation.
///
/// Cheap to clone; the glyph table is shared.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    /// The size scale the metrics were derived from.
    pub scale: SizeScale,
    /// Pixel constants for icons, padding, gaps and fonts.
    pub metrics: SizeMetrics,
    /// The glyph width table used for text.
    pub glyphs: Arc<GlyphWidthTable>,
    /// Label of the overflow trigger when it does not stand in for the active item.
    pub more_label: String,
    /// Width drawn between consecutive elements (breadcrumb separators).
    pub separator_px: f32,
}

impl LayoutContext {
    /// Create a context for the given size scale with the built-in glyph table.
    pub fn new(scale: SizeScale) -> Self {
        Self {
            scale,
            metrics: scale.metrics(),
            glyphs: Arc::new(GlyphWidthTable::default()),
            more_label: DEFAULT_MORE_LABEL.to_string(),
            separator_px: 0.0,
        }
    }

    /// Create a context from a metrics configuration.
    pub fn from_config(config: &MetricsConfig) -> MetricsResult<Self> {
        let resolved = config.resolve()?;
        Ok(Self {
            scale: resolved.scale,
            metrics: resolved.metrics,
            glyphs: Arc::new(resolved.glyphs),
            more_label: resolved.more_label,
            separator_px: 0.0,
        })
    }

    /// Swap the glyph width table.
    pub fn with_glyphs(mut self, glyphs: impl Into<Arc<GlyphWidthTable>>) -> Self {
        self.glyphs = glyphs.into();
        self
    }

    /// Set the overflow trigger label.
    pub fn with_more_label(mut self, label: impl Into<String>) -> Self {
        self.more_label = label.into();
        self
    }

    /// Set the width drawn between consecutive elements.
    pub fn with_separator_px(mut self, width: f32) -> Self {
        self.separator_px = width.max(0.0);
        self
    }

    /// Fixed width every element occupies besides its content.
    pub fn item_overhead(&self) -> f32 {
        self.metrics.item_overhead()
    }

    /// Estimated width of `text` at the label font size.
    pub fn text_width(&self, text: &str) -> f32 {
        self.glyphs.text_width(text, self.metrics.font_px)
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(SizeScale::default())
    }
}
