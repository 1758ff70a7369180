//! Neighbor-density transform.
//!
//! Each located report becomes one [`DensityOverlay`]. Its score is
//!
//! ```text
//! score = clamp(0.10 + t * 0.85 + like_boost * 0.20, 0, 1)
//! ```
//!
//! where `t` is the report's neighbor count divided by the largest neighbor
//! count in the set, and `like_boost` grows with the log of the report's
//! engagement weight. Every report keeps a visible floor intensity.

use buurtkompas_geo_models::{GeoPoint, ReportPoint};
use buurtkompas_heatmap_models::{DensityOverlay, HeatmapConfig};

use crate::color::{heat_alpha, heat_color};
use crate::neighbors::neighbor_counts;
use crate::{HeatmapError, validate_config};

/// Intensity every report gets regardless of neighbors or weight.
pub const SCORE_FLOOR: f64 = 0.10;

/// Contribution of normalized neighbor density.
pub const NEIGHBOR_WEIGHT: f64 = 0.85;

/// Contribution of the engagement boost.
pub const BOOST_WEIGHT: f64 = 0.20;

/// `log10(weight)` at which the engagement boost saturates (~20 likes).
pub const BOOST_SATURATION_LOG: f64 = 1.3;

/// Circle radius for the current zoom.
///
/// `base_radius_meters * clamp(zoom_scale / reference_zoom, min, max)`,
/// floored at `min_radius_meters`. Assumes a validated config.
#[must_use]
pub fn dynamic_radius(config: &HeatmapConfig, zoom_scale: f64) -> f64 {
    let factor =
        (zoom_scale / config.reference_zoom).clamp(config.min_zoom_factor, config.max_zoom_factor);
    (config.base_radius_meters * factor).max(config.min_radius_meters)
}

/// Normalizes neighbor counts by their maximum.
///
/// When no point has a neighbor (maximum of 1) every point gets
/// `isolated_intensity` instead of a full 1.0.
#[must_use]
pub fn normalize_counts(counts: &[usize], isolated_intensity: f64) -> Vec<f64> {
    let max = counts.iter().copied().max().unwrap_or(1).max(1);
    if max == 1 {
        return vec![isolated_intensity; counts.len()];
    }
    #[allow(clippy::cast_precision_loss)]
    let max = max as f64;
    counts
        .iter()
        .map(|&c| {
            #[allow(clippy::cast_precision_loss)]
            let c = c as f64;
            c / max
        })
        .collect()
}

/// Engagement boost in `[0, 1]` for a report weight.
#[must_use]
pub fn like_boost(weight: f64) -> f64 {
    let boost = weight.max(1.0).log10() / BOOST_SATURATION_LOG;
    if boost.is_nan() {
        0.0
    } else {
        boost.clamp(0.0, 1.0)
    }
}

/// Combined score in `[0, 1]` from normalized density `t` and weight.
#[must_use]
pub fn density_score(t: f64, weight: f64) -> f64 {
    let raw = like_boost(weight).mul_add(BOOST_WEIGHT, t.mul_add(NEIGHBOR_WEIGHT, SCORE_FLOOR));
    if raw.is_nan() {
        SCORE_FLOOR
    } else {
        raw.clamp(0.0, 1.0)
    }
}

/// Computes one density overlay per located report, in input order.
///
/// Reports without a coordinate are skipped. `zoom_scale` is the map's
/// current map-points-per-screen-point ratio.
///
/// # Errors
///
/// Returns an error if `config` fails [`validate_config`] or `zoom_scale`
/// is negative or not finite.
pub fn compute_density_overlays(
    points: &[ReportPoint],
    config: &HeatmapConfig,
    zoom_scale: f64,
) -> Result<Vec<DensityOverlay>, HeatmapError> {
    validate_config(config)?;
    if !zoom_scale.is_finite() || zoom_scale < 0.0 {
        return Err(HeatmapError::InvalidZoomScale(zoom_scale));
    }

    let located: Vec<(&ReportPoint, GeoPoint)> = points
        .iter()
        .filter_map(|p| p.coordinate.map(|c| (p, c)))
        .collect();

    if located.len() < points.len() {
        log::debug!(
            "Skipping {} reports without location",
            points.len() - located.len()
        );
    }
    if located.is_empty() {
        return Ok(Vec::new());
    }

    let radius_meters = dynamic_radius(config, zoom_scale);
    let coordinates: Vec<GeoPoint> = located.iter().map(|(_, c)| *c).collect();
    let counts = neighbor_counts(
        &coordinates,
        config.neighborhood_meters,
        config.neighbor_strategy,
    );
    let densities = normalize_counts(&counts, config.isolated_intensity);

    let overlays: Vec<DensityOverlay> = located
        .iter()
        .zip(counts)
        .zip(densities)
        .map(|(((point, center), neighbor_count), t)| {
            let score = density_score(t, point.engagement_weight());
            DensityOverlay {
                report_id: point.id.clone(),
                center: *center,
                radius_meters,
                color_stop: heat_color(score),
                alpha: heat_alpha(score, config.min_alpha, config.max_alpha),
                score,
                neighbor_count,
            }
        })
        .collect();

    log::debug!(
        "Computed {} density overlays (radius {radius_meters:.1}m)",
        overlays.len()
    );

    Ok(overlays)
}
