//! Discrete size scales and the pixel constants they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// The size scale of a strip of items.
///
/// Every scale maps to a fixed set of [SizeMetrics]; widgets pick a scale
/// instead of individual pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeScale {
    /// Extra compact items.
    Tiny,
    /// Compact items.
    Small,
    /// The default size.
    #[default]
    Normal,
    /// Large items.
    Big,
    /// Extra large items.
    Huge,
}

/// Pixel constants derived from a [SizeScale].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeMetrics {
    /// Width of a leading or trailing icon.
    pub icon_px: f32,
    /// Horizontal padding on each side of an item.
    pub padding_px: f32,
    /// Gap between parts of an item and between items.
    pub gap_px: f32,
    /// Font size of item labels.
    pub font_px: f32,
    /// Width of the close affordance glyph.
    pub close_icon_px: f32,
    /// Horizontal padding on each side of a badge.
    pub badge_padding_px: f32,
}

impl SizeMetrics {
    /// Fixed width every item occupies besides its content.
    pub fn item_overhead(&self) -> f32 {
        self.padding_px * 2.0 + self.gap_px * 2.0
    }

    /// Font size used for badge text, slightly smaller than labels.
    pub fn badge_font_px(&self) -> f32 {
        (self.font_px - 2.0).max(1.0)
    }
}

impl Default for SizeMetrics {
    fn default() -> Self {
        SizeScale::default().metrics()
    }
}

impl SizeScale {
    /// All scales, smallest first.
    pub const ALL: [SizeScale; 5] = [
        SizeScale::Tiny,
        SizeScale::Small,
        SizeScale::Normal,
        SizeScale::Big,
        SizeScale::Huge,
    ];

    /// Get the pixel constants for this scale.
    pub const fn metrics(self) -> SizeMetrics {
        let (icon_px, padding_px, gap_px, font_px, close_icon_px, badge_padding_px) = match self {
            SizeScale::Tiny => (12.0, 4.0, 2.0, 11.0, 10.0, 3.0),
            SizeScale::Small => (14.0, 5.0, 4.0, 12.0, 12.0, 4.0),
            SizeScale::Normal => (16.0, 6.0, 4.0, 13.0, 14.0, 4.0),
            SizeScale::Big => (20.0, 8.0, 6.0, 15.0, 16.0, 5.0),
            SizeScale::Huge => (24.0, 10.0, 8.0, 17.0, 18.0, 6.0),
        };

        SizeMetrics {
            icon_px,
            padding_px,
            gap_px,
            font_px,
            close_icon_px,
            badge_padding_px,
        }
    }

    /// The lowercase name of this scale.
    pub fn name(self) -> &'static str {
        match self {
            SizeScale::Tiny => "tiny",
            SizeScale::Small => "small",
            SizeScale::Normal => "normal",
            SizeScale::Big => "big",
            SizeScale::Huge => "huge",
        }
    }
}

impl fmt::Display for SizeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeScale {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiny" | "xs" => Ok(SizeScale::Tiny),
            "small" | "s" => Ok(SizeScale::Small),
            "normal" | "m" => Ok(SizeScale::Normal),
            "big" | "l" => Ok(SizeScale::Big),
            "huge" | "xl" => Ok(SizeScale::Huge),
            _ => Err(MetricsError::unknown_scale(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_grow_monotonically() {
        for pair in SizeScale::ALL.windows(2) {
            let (a, b) = (pair[0].metrics(), pair[1].metrics());
            assert!(a.icon_px < b.icon_px, "{} -> {}", pair[0], pair[1]);
            assert!(a.font_px < b.font_px);
            assert!(a.item_overhead() < b.item_overhead());
        }
    }

    #[test]
    fn test_normal_overhead() {
        assert_eq!(SizeScale::Normal.metrics().item_overhead(), 20.0);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("XS".parse::<SizeScale>().unwrap(), SizeScale::Tiny);
        assert_eq!(" big ".parse::<SizeScale>().unwrap(), SizeScale::Big);
        assert!(matches!(
            "gigantic".parse::<SizeScale>(),
            Err(MetricsError::UnknownScale { .. })
        ));
    }
}
