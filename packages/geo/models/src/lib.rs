#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate primitives shared by the hotspot and heatmap crates.
//!
//! [`GeoPoint`] is a validated latitude/longitude pair and [`ReportPoint`]
//! is the minimal projection of a citizen report that both density
//! algorithms operate on. Neither type knows anything about the document
//! store the reports come from.

use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean earth radius in meters, matching the radius `geo` uses for
/// haversine distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Great-circle length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;

/// Errors produced when constructing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    /// Latitude was NaN or infinite.
    #[error("Latitude must be finite, got {0}")]
    NonFiniteLatitude(f64),

    /// Longitude was NaN or infinite.
    #[error("Longitude must be finite, got {0}")]
    NonFiniteLongitude(f64),
}

/// A WGS84 coordinate in decimal degrees.
///
/// Only finiteness is checked. Values outside +-90 / +-180 are accepted and
/// treated as plain numbers by the bucketing and distance math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire shape of a [`GeoPoint`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeoPoint {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is NaN or infinite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() {
            return Err(GeoError::NonFiniteLatitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(GeoError::NonFiniteLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Haversine distance to `other` in meters.
    #[must_use]
    pub fn distance_meters(self, other: Self) -> f64 {
        Haversine.distance(geo::Point::from(self), geo::Point::from(other))
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

const fn default_weight() -> f64 {
    1.0
}

/// A geolocated report as seen by the density algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPoint {
    /// Report document ID.
    pub id: String,
    /// Report location. `None` means the report is skipped.
    pub coordinate: Option<GeoPoint>,
    /// Category label (e.g. `"vandalisme"`).
    pub category: String,
    /// Engagement signal, usually `likes + 1`. Read through
    /// [`ReportPoint::engagement_weight`].
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl ReportPoint {
    /// Creates a report point with the default weight of 1.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        coordinate: Option<GeoPoint>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate,
            category: category.into(),
            weight: default_weight(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The weight clamped to be non-negative. NaN counts as zero.
    #[must_use]
    pub fn engagement_weight(&self) -> f64 {
        self.weight.max(0.0)
    }
}

/// Converts a distance in meters to degrees of latitude.
#[must_use]
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}
