//! TOML configuration.
//!
//! A config file has an optional `[hotspots]` table and an optional
//! `[heatmap]` table. Missing keys fall back to the built-in defaults, which
//! are also shipped as `config/default.toml`.

use std::path::Path;

use buurtkompas_heatmap_models::HeatmapConfig;
use buurtkompas_hotspot_models::HotspotConfig;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// The default config file, embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hotspots: HotspotConfig,
    pub heatmap: HeatmapConfig,
}

/// Parses a config from TOML text.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the text is not valid TOML or a value has
/// the wrong type.
pub fn parse_config(text: &str) -> Result<AppConfig, CliError> {
    Ok(toml::from_str(text)?)
}

/// Loads the config at `path`, or the defaults when no path is given.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file is not a valid config
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    log::debug!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use buurtkompas_heatmap_models::NeighborStrategy;

    use super::*;

    #[test]
    fn embedded_default_matches_code_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG_TOML).unwrap(), AppConfig::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = parse_config(
            r#"
            [hotspots]
            top_n = 10

            [heatmap]
            neighborhood_meters = 150.0
            neighbor_strategy = { type = "indexed" }
            "#,
        )
        .unwrap();
        assert_eq!(config.hotspots.top_n, 10);
        assert!((config.hotspots.cell_size_degrees - 0.005).abs() < f64::EPSILON);
        assert!((config.heatmap.neighborhood_meters - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.heatmap.neighbor_strategy, NeighborStrategy::Indexed);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(matches!(
            parse_config("[hotspots]\ntop_n = \"many\""),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), AppConfig::default());
    }
}
