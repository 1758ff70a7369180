#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index for neighbor counting.
//!
//! Builds an R-tree over report coordinates and answers "how many points lie
//! within r meters of this one" without comparing every pair. Candidates
//! come from a degree envelope that provably contains the search circle and
//! are then filtered with the same haversine test the pairwise scan uses, so
//! both produce identical counts.

use buurtkompas_geo_models::{EARTH_RADIUS_METERS, GeoPoint};
use rstar::{AABB, RTree, RTreeObject};

/// Relative slack added to query envelopes to absorb rounding.
const ENVELOPE_SLACK: f64 = 1e-9;

/// A coordinate stored in the R-tree with its position in the input slice.
struct PointEntry {
    index: usize,
    point: GeoPoint,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree over a fixed set of coordinates.
///
/// Only meaningful for coordinates inside +-90 / +-180; see
/// [`all_in_range`].
pub struct NeighborIndex {
    tree: RTree<PointEntry>,
}

impl NeighborIndex {
    /// Bulk-loads `points` into a new index.
    #[must_use]
    pub fn build(points: &[GeoPoint]) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(index, &point)| PointEntry {
                index,
                point,
                envelope: AABB::from_point([point.longitude(), point.latitude()]),
            })
            .collect();

        let tree = RTree::bulk_load(entries);
        log::debug!("Built neighbor index over {} points", tree.size());

        Self { tree }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Indices of every indexed point within `radius_meters` (inclusive) of
    /// `center`, in ascending order.
    #[must_use]
    pub fn within(&self, center: GeoPoint, radius_meters: f64) -> Vec<usize> {
        let mut hits: Vec<usize> = query_envelopes(center, radius_meters)
            .iter()
            .flat_map(|env| self.tree.locate_in_envelope_intersecting(env))
            .filter(|entry| center.distance_meters(entry.point) <= radius_meters)
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Number of indexed points within `radius_meters` (inclusive) of
    /// `center`. A point located exactly at `center` is counted.
    #[must_use]
    pub fn count_within(&self, center: GeoPoint, radius_meters: f64) -> usize {
        query_envelopes(center, radius_meters)
            .iter()
            .flat_map(|env| self.tree.locate_in_envelope_intersecting(env))
            .filter(|entry| center.distance_meters(entry.point) <= radius_meters)
            .count()
    }
}

/// Returns `true` if every point lies inside +-90 latitude and +-180
/// longitude, the domain the index envelopes are built for.
#[must_use]
pub fn all_in_range(points: &[GeoPoint]) -> bool {
    points
        .iter()
        .all(|p| (-90.0..=90.0).contains(&p.latitude()) && (-180.0..=180.0).contains(&p.longitude()))
}

/// Degree boxes that together cover every point within `radius_meters` of
/// `center`.
///
/// For a great-circle distance `d`, `|dlat| <= d` and
/// `sin(dlon / 2) <= sin(d / 2) / cos(lat_max)`, which gives exact bounds.
/// Boxes crossing the antimeridian are split in two; boxes reaching a pole
/// span all longitudes.
fn query_envelopes(center: GeoPoint, radius_meters: f64) -> Vec<AABB<[f64; 2]>> {
    if radius_meters < 0.0 {
        return Vec::new();
    }

    let angular = radius_meters / EARTH_RADIUS_METERS;
    let dlat = angular.to_degrees() * (1.0 + ENVELOPE_SLACK) + ENVELOPE_SLACK;
    let lat = center.latitude();
    let min_lat = (lat - dlat).max(-90.0);
    let max_lat = (lat + dlat).min(90.0);

    let full_longitude = || vec![AABB::from_corners([-180.0, min_lat], [180.0, max_lat])];

    let lat_max = (lat - dlat).abs().max((lat + dlat).abs());
    if lat_max >= 90.0 {
        return full_longitude();
    }
    let ratio = (angular / 2.0).sin() / lat_max.to_radians().cos();
    if ratio >= 1.0 {
        return full_longitude();
    }
    let dlon = (2.0 * ratio.asin()).to_degrees() * (1.0 + ENVELOPE_SLACK) + ENVELOPE_SLACK;
    if dlon >= 180.0 {
        return full_longitude();
    }

    let lon = center.longitude();
    let min_lon = lon - dlon;
    let max_lon = lon + dlon;

    if min_lon < -180.0 {
        vec![
            AABB::from_corners([min_lon + 360.0, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lon, max_lat]),
        ]
    } else if max_lon > 180.0 {
        vec![
            AABB::from_corners([min_lon, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lon - 360.0, max_lat]),
        ]
    } else {
        vec![AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])]
    }
}
