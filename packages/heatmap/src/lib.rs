#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Density heatmap for report markers.
//!
//! Turns located reports into colored circles whose intensity reflects how
//! many other reports lie nearby and how much engagement the report has.
//! See [`compute_density_overlays`].

pub mod color;
pub mod density;
pub mod neighbors;
pub mod render;

pub use buurtkompas_heatmap_models::{
    DensityOverlay, HeatmapConfig, LegendStop, NeighborStrategy, Rgb,
};
pub use color::{heat_alpha, heat_color, legend_stops};
pub use density::compute_density_overlays;
pub use render::{BlendMode, CirclePaint, OverlayStyle};

use thiserror::Error;

/// Errors from the heatmap transform.
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// A configuration value is out of range.
    #[error("Invalid heatmap config: {message}")]
    InvalidConfig { message: String },

    /// The zoom scale is negative or not finite.
    #[error("Invalid zoom scale: {0}")]
    InvalidZoomScale(f64),
}

fn invalid(message: impl Into<String>) -> HeatmapError {
    HeatmapError::InvalidConfig {
        message: message.into(),
    }
}

/// Checks that `config` can be used by [`compute_density_overlays`].
///
/// # Errors
///
/// Returns [`HeatmapError::InvalidConfig`] naming the first offending field.
pub fn validate_config(config: &HeatmapConfig) -> Result<(), HeatmapError> {
    let fields = [
        ("neighborhood_meters", config.neighborhood_meters),
        ("base_radius_meters", config.base_radius_meters),
        ("reference_zoom", config.reference_zoom),
        ("min_zoom_factor", config.min_zoom_factor),
        ("max_zoom_factor", config.max_zoom_factor),
        ("min_radius_meters", config.min_radius_meters),
        ("isolated_intensity", config.isolated_intensity),
        ("min_alpha", config.min_alpha),
        ("max_alpha", config.max_alpha),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(invalid(format!("{name} must be finite, got {value}")));
        }
        if value < 0.0 {
            return Err(invalid(format!("{name} must not be negative, got {value}")));
        }
    }

    if config.reference_zoom <= 0.0 {
        return Err(invalid("reference_zoom must be positive"));
    }
    if config.min_zoom_factor > config.max_zoom_factor {
        return Err(invalid(format!(
            "min_zoom_factor {} exceeds max_zoom_factor {}",
            config.min_zoom_factor, config.max_zoom_factor
        )));
    }
    if config.isolated_intensity > 1.0 {
        return Err(invalid("isolated_intensity must be at most 1"));
    }
    if config.max_alpha > 1.0 {
        return Err(invalid("max_alpha must be at most 1"));
    }
    if config.min_alpha > config.max_alpha {
        return Err(invalid(format!(
            "min_alpha {} exceeds max_alpha {}",
            config.min_alpha, config.max_alpha
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HeatmapConfig::default()).is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let cases = [
            HeatmapConfig {
                neighborhood_meters: -1.0,
                ..HeatmapConfig::default()
            },
            HeatmapConfig {
                base_radius_meters: f64::NAN,
                ..HeatmapConfig::default()
            },
            HeatmapConfig {
                min_radius_meters: f64::INFINITY,
                ..HeatmapConfig::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                validate_config(&config),
                Err(HeatmapError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn rejects_inverted_bounds() {
        let zoom = HeatmapConfig {
            min_zoom_factor: 3.0,
            max_zoom_factor: 1.0,
            ..HeatmapConfig::default()
        };
        let alpha = HeatmapConfig {
            min_alpha: 0.9,
            max_alpha: 0.5,
            ..HeatmapConfig::default()
        };
        assert!(validate_config(&zoom).is_err());
        assert!(validate_config(&alpha).is_err());
    }

    #[test]
    fn rejects_zero_reference_zoom_and_opaque_overflow() {
        let zoom = HeatmapConfig {
            reference_zoom: 0.0,
            ..HeatmapConfig::default()
        };
        let alpha = HeatmapConfig {
            max_alpha: 1.5,
            ..HeatmapConfig::default()
        };
        assert!(validate_config(&zoom).is_err());
        assert!(validate_config(&alpha).is_err());
    }

    #[test]
    fn zero_radius_is_allowed() {
        let config = HeatmapConfig {
            neighborhood_meters: 0.0,
            ..HeatmapConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn error_message_names_field() {
        let err = validate_config(&HeatmapConfig {
            min_alpha: -0.1,
            ..HeatmapConfig::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("min_alpha"));
    }
}
