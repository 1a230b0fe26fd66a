use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::dataset::InteractionHints;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "RUSTY_LOGVIEW_CONFIG";

/// Viewer settings.  Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Axis ids offered in the per-series axis selector.
    pub axis_ids: Vec<String>,
    /// Axis given to a series when it is first enabled.
    pub default_axis: String,
    /// Points per series above which the plot decimates.
    pub decimation_threshold: usize,
    pub line_width: f32,
    /// Redraw whenever the axis assignment changes.
    pub auto_redraw: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            axis_ids: ["y1", "y2", "y3", "y4"].iter().map(|s| s.to_string()).collect(),
            default_axis: "y1".to_string(),
            decimation_threshold: InteractionHints::default().decimation_threshold,
            line_width: 1.0,
            auto_redraw: true,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing viewer config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Load from [`CONFIG_ENV`] if set, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn interaction_hints(&self) -> InteractionHints {
        InteractionHints {
            decimation_threshold: self.decimation_threshold,
            ..InteractionHints::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "default_axis": "rpm", "auto_redraw": false }"#)
            .unwrap();
        assert_eq!(config.default_axis, "rpm");
        assert!(!config.auto_redraw);
        assert_eq!(config.axis_ids, ViewerConfig::default().axis_ids);
        assert_eq!(config.line_width, 1.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(ViewerConfig::from_json("{ \"line_width\": \"thick\" }").is_err());
    }

    #[test]
    fn test_hints_carry_threshold() {
        let config = ViewerConfig {
            decimation_threshold: 64,
            ..ViewerConfig::default()
        };
        let hints = config.interaction_hints();
        assert_eq!(hints.decimation_threshold, 64);
        assert!(hints.nearest_along_x);
    }
}
