#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hotspot aggregation types.
//!
//! A hotspot is one cell of a fixed latitude/longitude lattice together
//! with the number of reports that fell into it. Cells are addressed by a
//! [`BucketKey`]; the hotspot center is the cell origin, not the centroid
//! of its reports.

use buurtkompas_geo_models::{GeoError, GeoPoint};
use serde::{Deserialize, Serialize};

/// Default lattice cell size. 0.005 degrees of latitude is roughly 550m.
pub const DEFAULT_CELL_SIZE_DEGREES: f64 = 0.005;

/// Default number of hotspots returned.
pub const DEFAULT_TOP_N: usize = 5;

/// Integer address of a lattice cell.
///
/// Ordered by `lat_cell`, then `lon_cell`. That order is the tie-break when
/// two hotspots have the same count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct BucketKey {
    pub lat_cell: i64,
    pub lon_cell: i64,
}

impl BucketKey {
    /// Snaps `point` to the nearest cell origin.
    ///
    /// Uses round-half-away-from-zero, so `-0.5` cells maps to `-1`.
    /// Returns `None` if a cell index does not fit in an `i64`, which happens
    /// when the cell size is tiny relative to the coordinate.
    #[must_use]
    pub fn for_point(point: GeoPoint, cell_size_degrees: f64) -> Option<Self> {
        Some(Self {
            lat_cell: cell_index(point.latitude(), cell_size_degrees)?,
            lon_cell: cell_index(point.longitude(), cell_size_degrees)?,
        })
    }

    /// The cell origin in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_size_degrees` is not finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn center(self, cell_size_degrees: f64) -> Result<GeoPoint, GeoError> {
        GeoPoint::new(
            self.lat_cell as f64 * cell_size_degrees,
            self.lon_cell as f64 * cell_size_degrees,
        )
    }

    /// Stable identifier for the cell, e.g. `"10400:1000"`.
    #[must_use]
    pub fn id(self) -> String {
        format!("{}:{}", self.lat_cell, self.lon_cell)
    }
}

/// Rounded `coordinate / cell_size_degrees`, or `None` outside the `i64`
/// range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn cell_index(coordinate: f64, cell_size_degrees: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;

    let cell = (coordinate / cell_size_degrees).round();
    (cell >= LOWER && cell < UPPER).then_some(cell as i64)
}

/// A lattice cell with its report count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Opaque identifier, derived from the cell address.
    pub id: String,
    pub cell: BucketKey,
    /// Cell origin (grid-snapped, not averaged).
    pub center: GeoPoint,
    /// Number of reports in the cell. Always at least 1.
    pub count: usize,
    /// Most frequent category in the cell. `None` only when every report in
    /// the cell has an empty category label.
    pub top_category: Option<String>,
}

/// Hotspot aggregation parameters, read from the `[hotspots]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Lattice cell size in degrees. Must be positive and finite.
    pub cell_size_degrees: f64,
    /// Maximum number of hotspots returned. Must be at least 1.
    pub top_n: usize,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            cell_size_degrees: DEFAULT_CELL_SIZE_DEGREES,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        let p = GeoPoint::new(0.0025, -0.0025).unwrap();
        let key = BucketKey::for_point(p, 0.005).unwrap();
        assert_eq!(key, BucketKey { lat_cell: 1, lon_cell: -1 });
    }

    #[test]
    fn center_is_cell_origin() {
        let p = GeoPoint::new(52.0012, 5.0024).unwrap();
        let key = BucketKey::for_point(p, 0.005).unwrap();
        assert_eq!(key, BucketKey { lat_cell: 10400, lon_cell: 1000 });

        let center = key.center(0.005).unwrap();
        assert!((center.latitude() - 52.0).abs() < 1e-9);
        assert!((center.longitude() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn cell_index_outside_i64_is_rejected() {
        let p = GeoPoint::new(52.0, 5.0).unwrap();
        assert_eq!(BucketKey::for_point(p, 1e-300), None);

        let equator = GeoPoint::new(0.0, 0.0).unwrap();
        assert_eq!(
            BucketKey::for_point(equator, 1e-300),
            Some(BucketKey { lat_cell: 0, lon_cell: 0 })
        );

        let south_west = GeoPoint::new(-52.0, -5.0).unwrap();
        assert_eq!(BucketKey::for_point(south_west, 1e-300), None);
    }

    #[test]
    fn key_order_is_lat_then_lon() {
        let a = BucketKey { lat_cell: 1, lon_cell: 9 };
        let b = BucketKey { lat_cell: 2, lon_cell: 0 };
        let c = BucketKey { lat_cell: 2, lon_cell: 1 };
        assert!(a < b && b < c);
        assert_eq!(c.id(), "2:1");
    }

    #[test]
    fn config_defaults_fill_missing_keys() {
        let config: HotspotConfig = toml::from_str("top_n = 3").unwrap();
        assert_eq!(config.top_n, 3);
        assert!((config.cell_size_degrees - DEFAULT_CELL_SIZE_DEGREES).abs() < f64::EPSILON);
    }
}
