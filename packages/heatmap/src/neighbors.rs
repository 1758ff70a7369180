//! Neighbor counting.
//!
//! A point's neighbor count is 1 (itself) plus every other point within the
//! neighborhood radius, inclusive. The pairwise scan is quadratic; the
//! indexed variant asks a [`NeighborIndex`] instead and returns the same
//! counts.

use buurtkompas_geo_models::GeoPoint;
use buurtkompas_heatmap_models::NeighborStrategy;
use buurtkompas_spatial::{NeighborIndex, all_in_range};

/// Counts neighbors for every point using `strategy`.
///
/// Falls back to the pairwise scan when an index is requested but some
/// coordinates lie outside +-90 / +-180.
#[must_use]
pub fn neighbor_counts(
    points: &[GeoPoint],
    radius_meters: f64,
    strategy: NeighborStrategy,
) -> Vec<usize> {
    let use_index = match strategy {
        NeighborStrategy::Pairwise => false,
        NeighborStrategy::Indexed => true,
        NeighborStrategy::Auto { index_threshold } => points.len() > index_threshold,
    };

    if use_index {
        if all_in_range(points) {
            return indexed_counts(points, radius_meters);
        }
        log::warn!("Coordinates outside the WGS84 range, using pairwise neighbor scan");
    }

    pairwise_counts(points, radius_meters)
}

/// Quadratic scan over every pair.
#[must_use]
pub fn pairwise_counts(points: &[GeoPoint], radius_meters: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, a)| {
            1 + points
                .iter()
                .enumerate()
                .filter(|&(j, b)| j != i && a.distance_meters(*b) <= radius_meters)
                .count()
        })
        .collect()
}

/// R-tree backed scan. Each point finds itself at distance zero, so the
/// index count already includes it.
#[must_use]
pub fn indexed_counts(points: &[GeoPoint], radius_meters: f64) -> Vec<usize> {
    let index = NeighborIndex::build(points);
    points
        .iter()
        .map(|p| index.count_within(*p, radius_meters).max(1))
        .collect()
}
