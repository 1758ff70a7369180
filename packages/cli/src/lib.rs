#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library half of the `buurtkompas` command-line tool.
//!
//! Loads a JSON dump of report documents, applies the map filters, and runs
//! either the hotspot aggregation or the density heatmap over the result.
//! Output is rendered as plain JSON or as a `GeoJSON` feature collection.

pub mod config;
pub mod export;
pub mod input;

use buurtkompas_heatmap::{DensityOverlay, HeatmapError, compute_density_overlays};
use buurtkompas_hotspot::{HotspotError, build_hotspots};
use buurtkompas_hotspot_models::Hotspot;
use buurtkompas_report_models::{Report, ReportFilter};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::config::AppConfig;

/// Errors surfaced by the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Hotspot(#[from] HotspotError),

    #[error(transparent)]
    Heatmap(#[from] HeatmapError),

    /// `--only-mine` was given without a user to match against.
    #[error("--only-mine requires --user-id")]
    MissingUserId,
}

/// Output encoding for computed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Geojson,
}

/// Checks the filter before it is applied.
///
/// # Errors
///
/// Returns [`CliError::MissingUserId`] if "only mine" is set without a user.
pub fn validate_filter(filter: &ReportFilter) -> Result<(), CliError> {
    if filter.only_mine && filter.current_user_id.is_none() {
        return Err(CliError::MissingUserId);
    }
    Ok(())
}

/// Filters `reports` and returns the busiest grid cells.
///
/// # Errors
///
/// * If the filter is inconsistent
/// * If the hotspot config is invalid
pub fn run_hotspots(
    reports: &[Report],
    filter: &ReportFilter,
    config: &AppConfig,
) -> Result<Vec<Hotspot>, CliError> {
    validate_filter(filter)?;
    let points = filter.points(reports);
    log::info!(
        "Aggregating {} of {} reports into hotspots",
        points.len(),
        reports.len()
    );
    Ok(build_hotspots(&points, &config.hotspots)?)
}

/// Filters `reports` and computes density overlays at `zoom_scale`.
///
/// # Errors
///
/// * If the filter is inconsistent
/// * If the heatmap config or zoom scale is invalid
pub fn run_heatmap(
    reports: &[Report],
    filter: &ReportFilter,
    config: &AppConfig,
    zoom_scale: f64,
) -> Result<Vec<DensityOverlay>, CliError> {
    validate_filter(filter)?;
    let points = filter.points(reports);
    log::info!(
        "Computing heatmap for {} of {} reports at zoom scale {zoom_scale}",
        points.len(),
        reports.len()
    );
    Ok(compute_density_overlays(&points, &config.heatmap, zoom_scale)?)
}
