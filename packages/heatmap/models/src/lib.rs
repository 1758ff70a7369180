#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heatmap overlay types.
//!
//! The density transform turns each located report into one
//! [`DensityOverlay`]: a colored, semi-transparent circle that a map
//! renderer composites additively so overlapping circles brighten.

use buurtkompas_geo_models::GeoPoint;
use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`.
///
/// Serialized as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation; `k = 0` yields `self`.
    #[must_use]
    pub fn lerp(self, other: Self, k: f64) -> Self {
        Self {
            r: (other.r - self.r).mul_add(k, self.r),
            g: (other.g - self.g).mul_add(k, self.g),
            b: (other.b - self.b).mul_add(k, self.b),
        }
    }

    /// `#rrggbb` form, channels clamped to `[0, 1]` first.
    #[must_use]
    pub fn to_hex(self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// One anchor of the heat color ramp, for drawing a legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendStop {
    /// Score at which this color is reached, in `[0, 1]`.
    pub position: f64,
    pub color: Rgb,
}

/// A renderable density circle for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityOverlay {
    /// ID of the report this circle represents, for hit-testing.
    pub report_id: String,
    pub center: GeoPoint,
    /// Zoom-compensated circle radius.
    pub radius_meters: f64,
    /// Ramp color for [`Self::score`].
    pub color_stop: Rgb,
    /// Fill opacity in `[min_alpha, max_alpha]`.
    pub alpha: f64,
    /// Combined density and engagement score in `[0, 1]`.
    pub score: f64,
    /// Points within the neighborhood radius, including this one.
    pub neighbor_count: usize,
}

/// How neighbor counts are computed. Every strategy yields the same counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NeighborStrategy {
    /// Compare every pair of points. Quadratic.
    Pairwise,
    /// Query an R-tree built over the points.
    Indexed,
    /// Pairwise up to `index_threshold` points, indexed above it.
    Auto {
        #[serde(default = "default_index_threshold")]
        index_threshold: usize,
    },
}

const fn default_index_threshold() -> usize {
    256
}

impl Default for NeighborStrategy {
    fn default() -> Self {
        Self::Auto {
            index_threshold: default_index_threshold(),
        }
    }
}

/// Heatmap parameters, read from the `[heatmap]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Two points closer than this are neighbors.
    pub neighborhood_meters: f64,
    /// Circle radius at the reference zoom.
    pub base_radius_meters: f64,
    /// Zoom scale (map points per screen point) at which circles have
    /// exactly `base_radius_meters`.
    pub reference_zoom: f64,
    /// Lower clamp for `zoom_scale / reference_zoom`.
    pub min_zoom_factor: f64,
    /// Upper clamp for `zoom_scale / reference_zoom`.
    pub max_zoom_factor: f64,
    /// Circles are never smaller than this.
    pub min_radius_meters: f64,
    /// Density used for every point when no point has a neighbor.
    pub isolated_intensity: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub neighbor_strategy: NeighborStrategy,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            neighborhood_meters: 320.0,
            base_radius_meters: 260.0,
            reference_zoom: 4000.0,
            min_zoom_factor: 0.4,
            max_zoom_factor: 2.8,
            min_radius_meters: 5.0,
            isolated_intensity: 0.1,
            min_alpha: 0.22,
            max_alpha: 0.95,
            neighbor_strategy: NeighborStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rounds_and_clamps() {
        assert_eq!(Rgb::new(0.0, 0.22, 0.60).to_hex(), "#003899");
        assert_eq!(Rgb::new(1.5, -0.2, 1.0).to_hex(), "#ff00ff");
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(0.0, 0.22, 0.60);
        let b = Rgb::new(0.0, 0.65, 0.74);
        assert_eq!(a.lerp(b, 0.0), a);
        let end = a.lerp(b, 1.0);
        assert!((end.g - b.g).abs() < 1e-12);
        assert!((end.b - b.b).abs() < 1e-12);
    }

    #[test]
    fn rgb_serializes_as_array() {
        let json = serde_json::to_string(&Rgb::new(0.5, 0.25, 1.0)).unwrap();
        assert_eq!(json, "[0.5,0.25,1.0]");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn config_reads_partial_toml() {
        let config: HeatmapConfig = toml::from_str(
            r#"
            neighborhood_meters = 500.0
            neighbor_strategy = { type = "pairwise" }
            "#,
        )
        .unwrap();
        assert!((config.neighborhood_meters - 500.0).abs() < f64::EPSILON);
        assert!((config.base_radius_meters - 260.0).abs() < f64::EPSILON);
        assert_eq!(config.neighbor_strategy, NeighborStrategy::Pairwise);
    }

    #[test]
    fn auto_strategy_threshold_defaults() {
        let config: HeatmapConfig =
            toml::from_str(r#"neighbor_strategy = { type = "auto" }"#).unwrap();
        assert_eq!(
            config.neighbor_strategy,
            NeighborStrategy::Auto {
                index_threshold: 256
            }
        );
    }
}
