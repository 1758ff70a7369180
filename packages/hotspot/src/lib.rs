#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Grid-bucket hotspot aggregation.
//!
//! Reports are snapped to a fixed lattice (see
//! [`BucketKey::for_point`]), counted per cell, and the busiest cells are
//! returned as [`Hotspot`]s. Every call builds its buckets from scratch;
//! nothing is cached between calls.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use buurtkompas_geo_models::{GeoError, ReportPoint};
use buurtkompas_hotspot_models::{BucketKey, Hotspot, HotspotConfig};
use thiserror::Error;

/// Errors that can occur during hotspot aggregation.
#[derive(Debug, Error)]
pub enum HotspotError {
    /// The aggregation parameters are unusable.
    #[error("Invalid hotspot config: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },

    /// A cell origin could not be represented as a coordinate.
    #[error("Geo error: {0}")]
    Geo(#[from] GeoError),
}

/// Checks that `config` describes a usable lattice.
///
/// # Errors
///
/// Returns [`HotspotError::InvalidConfig`] if the cell size is not a
/// positive finite number or `top_n` is zero.
pub fn validate_config(config: &HotspotConfig) -> Result<(), HotspotError> {
    if !config.cell_size_degrees.is_finite() || config.cell_size_degrees <= 0.0 {
        return Err(HotspotError::InvalidConfig {
            message: format!(
                "cell_size_degrees must be positive and finite, got {}",
                config.cell_size_degrees
            ),
        });
    }
    if config.top_n == 0 {
        return Err(HotspotError::InvalidConfig {
            message: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Per-cell running totals.
#[derive(Default)]
struct BucketTally {
    count: usize,
    /// Category counts in first-seen order.
    categories: Vec<(String, usize)>,
}

impl BucketTally {
    fn add(&mut self, category: &str) {
        self.count += 1;
        if category.is_empty() {
            return;
        }
        if let Some(entry) = self.categories.iter_mut().find(|(c, _)| c == category) {
            entry.1 += 1;
        } else {
            self.categories.push((category.to_string(), 1));
        }
    }

    /// Highest count wins; on a tie the category seen first wins.
    fn top_category(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.categories {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(category, _)| category.as_str())
    }
}

/// Aggregates `reports` into at most `config.top_n` hotspots, busiest first.
///
/// Reports without a coordinate are skipped. Cells with equal counts are
/// ordered by ascending [`BucketKey`].
///
/// # Errors
///
/// Returns an error if `config` fails [`validate_config`], or if the cell
/// size is so small that a report's cell index overflows an `i64`.
pub fn build_hotspots(
    reports: &[ReportPoint],
    config: &HotspotConfig,
) -> Result<Vec<Hotspot>, HotspotError> {
    validate_config(config)?;

    let mut buckets: BTreeMap<BucketKey, BucketTally> = BTreeMap::new();
    let mut skipped = 0_usize;

    for report in reports {
        let Some(coordinate) = report.coordinate else {
            skipped += 1;
            continue;
        };
        let key = BucketKey::for_point(coordinate, config.cell_size_degrees).ok_or_else(|| {
            HotspotError::InvalidConfig {
                message: format!(
                    "cell_size_degrees {} is too small to address ({}, {})",
                    config.cell_size_degrees,
                    coordinate.latitude(),
                    coordinate.longitude()
                ),
            }
        })?;
        buckets.entry(key).or_default().add(&report.category);
    }

    log::debug!(
        "Bucketed {} reports into {} cells ({skipped} without location)",
        reports.len() - skipped,
        buckets.len()
    );

    let mut hotspots = Vec::with_capacity(buckets.len());
    for (key, tally) in buckets {
        log::trace!("Cell {} holds {} reports", key.id(), tally.count);
        hotspots.push(Hotspot {
            id: key.id(),
            cell: key,
            center: key.center(config.cell_size_degrees)?,
            count: tally.count,
            top_category: tally.top_category().map(str::to_string),
        });
    }

    // Stable sort: equal counts keep the ascending key order of the map.
    hotspots.sort_by_key(|h| Reverse(h.count));
    hotspots.truncate(config.top_n);

    Ok(hotspots)
}
