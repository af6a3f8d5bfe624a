//! # Metrics Configuration
//!
//! Selects the size scale, the overflow token label and an optional custom
//! glyph width table.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults (`normal` scale, `"More"`, built-in glyph table)
//! 2. User config: `~/.config/crease/metrics.toml` (XDG_CONFIG_HOME)
//! 3. The file named by `CREASE_METRICS_CONFIG`
//! 4. `CREASE_SIZE`, `CREASE_MORE_LABEL` and `CREASE_GLYPH_TABLE`
//!
//! ## File Format
//!
//! ```toml
//! [metrics]
//! scale = "small"
//! more_label = "More"
//! glyph_table = "./glyphs.toml"
//! ```
//!
//! JSON files with the same shape are accepted when the extension is `.json`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use xdg::BaseDirectories;

use crate::error::{MetricsError, MetricsResult};
use crate::metrics::{extension, GlyphWidthTable};
use crate::size::{SizeMetrics, SizeScale};

/// Environment variable naming a configuration file.
pub const ENV_CONFIG: &str = "CREASE_METRICS_CONFIG";
/// Environment variable selecting the size scale.
pub const ENV_SIZE: &str = "CREASE_SIZE";
/// Environment variable overriding the overflow token label.
pub const ENV_MORE_LABEL: &str = "CREASE_MORE_LABEL";
/// Environment variable naming a glyph width table file.
pub const ENV_GLYPH_TABLE: &str = "CREASE_GLYPH_TABLE";

/// Default label of the overflow disclosure trigger.
pub const DEFAULT_MORE_LABEL: &str = "More";

const XDG_PREFIX: &str = "crease";
const CONFIG_FILE_NAME: &str = "metrics.toml";

/// Metrics configuration for width estimation.
///
/// # Examples
///
/// ```rust
/// use crease_theme::config::MetricsConfig;
/// use crease_theme::size::SizeScale;
///
/// let config = MetricsConfig::new()
///     .with_scale(SizeScale::Small)
///     .with_more_label("…");
///
/// let resolved = config.resolve().unwrap();
/// assert_eq!(resolved.more_label, "…");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// The size scale.
    pub scale: SizeScale,
    /// Label of the overflow trigger when it does not stand in for the active item.
    pub more_label: String,
    /// Optional path to a custom glyph width table.
    pub glyph_table: Option<PathBuf>,
}

/// The values produced by [MetricsConfig::resolve].
#[derive(Debug, Clone)]
pub struct ResolvedMetrics {
    /// The scale the metrics were derived from.
    pub scale: SizeScale,
    /// Pixel constants for the scale.
    pub metrics: SizeMetrics,
    /// The glyph width table.
    pub glyphs: GlyphWidthTable,
    /// Label of the overflow trigger.
    pub more_label: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    metrics: MetricsSection,
}

#[derive(Debug, Default, Deserialize)]
struct MetricsSection {
    scale: Option<SizeScale>,
    more_label: Option<String>,
    glyph_table: Option<PathBuf>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            scale: SizeScale::Normal,
            more_label: DEFAULT_MORE_LABEL.to_string(),
            glyph_table: None,
        }
    }

    /// Set the size scale.
    pub fn with_scale(mut self, scale: SizeScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set the overflow token label.
    pub fn with_more_label(mut self, label: impl Into<String>) -> Self {
        self.more_label = label.into();
        self
    }

    /// Use a custom glyph width table file.
    pub fn with_glyph_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.glyph_table = Some(path.into());
        self
    }

    /// Load a configuration file on top of the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> MetricsResult<Self> {
        let mut config = Self::new();
        config.merge_file(path.as_ref())?;
        Ok(config)
    }

    /// Build a configuration from the environment on top of the defaults.
    pub fn from_env() -> MetricsResult<Self> {
        let mut config = Self::new();
        config.apply_env_with(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Build a configuration from the environment, falling back to the
    /// defaults when anything is invalid.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            log::warn!("Invalid metrics configuration in environment, using defaults: {}", err);
            Self::new()
        })
    }

    /// Load configuration from every source in precedence order.
    ///
    /// Invalid sources are logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::new();

        match BaseDirectories::with_prefix(XDG_PREFIX) {
            Ok(dirs) => {
                if let Some(path) = dirs.find_config_file(CONFIG_FILE_NAME) {
                    if let Err(err) = config.merge_file(&path) {
                        log::warn!("Skipping metrics config {:?}: {}", path, err);
                    }
                }
            },
            Err(err) => log::debug!("No XDG base directories: {}", err),
        }

        let fallback = config.clone();
        if let Err(err) = config.apply_env_with(|key| env::var(key).ok()) {
            log::warn!("Ignoring metrics environment overrides: {}", err);
            config = fallback;
        }

        config
    }

    /// Resolve the configuration into concrete metrics and a glyph table.
    pub fn resolve(&self) -> MetricsResult<ResolvedMetrics> {
        let glyphs = match &self.glyph_table {
            Some(path) => GlyphWidthTable::from_file(path)?,
            None => GlyphWidthTable::default(),
        };

        Ok(ResolvedMetrics {
            scale: self.scale,
            metrics: self.scale.metrics(),
            glyphs,
            more_label: self.more_label.clone(),
        })
    }

    fn merge_file(&mut self, path: &Path) -> MetricsResult<()> {
        if !path.exists() {
            return Err(MetricsError::file_not_found(path));
        }

        let source = fs::read_to_string(path)?;
        let file: ConfigFile = match extension(path).as_deref() {
            Some("toml") => {
                toml::from_str(&source).map_err(|e| MetricsError::parse_error(path, e.to_string()))?
            },
            Some("json") => serde_json::from_str(&source)
                .map_err(|e| MetricsError::parse_error(path, e.to_string()))?,
            _ => {
                return Err(MetricsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            },
        };

        let section = file.metrics;
        if let Some(scale) = section.scale {
            self.scale = scale;
        }
        if let Some(label) = section.more_label {
            self.more_label = label;
        }
        if let Some(table) = section.glyph_table {
            // Relative table paths are resolved against the config file.
            self.glyph_table = Some(match path.parent() {
                Some(dir) if table.is_relative() => dir.join(table),
                _ => table,
            });
        }

        Ok(())
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> MetricsResult<()> {
        if let Some(path) = lookup(ENV_CONFIG) {
            self.merge_file(Path::new(&path))?;
        }
        if let Some(scale) = lookup(ENV_SIZE) {
            self.scale = scale.parse()?;
        }
        if let Some(label) = lookup(ENV_MORE_LABEL) {
            self.more_label = label;
        }
        if let Some(path) = lookup(ENV_GLYPH_TABLE) {
            self.glyph_table = Some(PathBuf::from(path));
        }

        Ok(())
    }
}
