#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report record and taxonomy types.
//!
//! [`Report`] mirrors a document in the `reports` collection of the remote
//! store. Category and status are kept as raw strings on the record so that
//! unknown values written by newer clients survive a round trip; typed
//! views are available through [`Report::category_enum`] and
//! [`Report::status_enum`].
//!
//! [`ReportFilter`] is the map screen's filter bar: it narrows a snapshot
//! before the snapshot is handed to the hotspot or heatmap computation.

pub mod municipality;

use std::collections::BTreeSet;
use std::str::FromStr as _;

use buurtkompas_geo_models::{GeoPoint, ReportPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Category a citizen picks when filing a report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportCategory {
    /// Street lighting
    Verlichting,
    /// Litter bins
    Vuilnisbak,
    /// Traffic
    Verkeer,
    /// Vandalism
    Vandalisme,
    /// Nuisance
    Overlast,
    /// Anything else
    Anders,
}

impl ReportCategory {
    /// Parses a stored category value, falling back to [`Self::Anders`] for
    /// missing or unknown values.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|s| Self::from_str(s).ok())
            .unwrap_or(Self::Anders)
    }

    /// Human-readable Dutch label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Verlichting => "Verlichting",
            Self::Vuilnisbak => "Vuilnisbak",
            Self::Verkeer => "Verkeer",
            Self::Vandalisme => "Vandalisme",
            Self::Overlast => "Overlast",
            Self::Anders => "Anders",
        }
    }

    /// Icon name used for map pins and filter chips.
    #[must_use]
    pub const fn symbol_name(self) -> &'static str {
        match self {
            Self::Verlichting => "lightbulb.max.fill",
            Self::Vuilnisbak => "trash.fill",
            Self::Verkeer => "car.fill",
            Self::Vandalisme => "hammer.fill",
            Self::Overlast => "exclamationmark.bubble.fill",
            Self::Anders => "questionmark.circle.fill",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Verlichting,
            Self::Vuilnisbak,
            Self::Verkeer,
            Self::Vandalisme,
            Self::Overlast,
            Self::Anders,
        ]
    }
}

/// Moderation status of a report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    /// Newly filed, not yet picked up
    Open,
    /// Municipality is working on it
    InProgress,
    /// Closed as fixed
    Resolved,
    /// Municipality asked the reporter for more information
    NeedInfo,
}

impl ReportStatus {
    /// Human-readable Dutch label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In behandeling",
            Self::Resolved => "Opgelost",
            Self::NeedInfo => "Meer info",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Open, Self::InProgress, Self::Resolved, Self::NeedInfo]
    }
}

fn default_category() -> String {
    ReportCategory::Anders.to_string()
}

fn default_status() -> String {
    ReportStatus::Open.to_string()
}

const fn default_true() -> bool {
    true
}

/// A report document as stored in the remote document database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Document ID.
    pub id: String,
    /// UID of the citizen who filed the report.
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Raw category value, see [`ReportCategory`].
    #[serde(default = "default_category")]
    pub category: String,
    /// Raw status value, see [`ReportStatus`].
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_true")]
    pub is_anonymous: bool,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Where the issue was reported. Older documents may lack it.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Municipality slug (see [`municipality`]).
    #[serde(default)]
    pub municipality_id: Option<String>,
}

impl Report {
    #[must_use]
    pub fn category_enum(&self) -> ReportCategory {
        ReportCategory::from_raw(Some(&self.category))
    }

    /// Typed status, or `None` if the stored value is not recognized.
    #[must_use]
    pub fn status_enum(&self) -> Option<ReportStatus> {
        ReportStatus::from_str(&self.status).ok()
    }

    /// Projects this report onto the input of the density algorithms.
    ///
    /// The weight is `likes + 1`, so a report without likes still carries
    /// weight 1.
    #[must_use]
    pub fn to_point(&self) -> ReportPoint {
        ReportPoint::new(self.id.clone(), self.location, self.category.clone())
            .with_weight(f64::from(self.likes.saturating_add(1)))
    }
}

/// Filter bar state for the map screen.
///
/// Empty category and status selections match every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub statuses: BTreeSet<String>,
    /// Only keep reports by [`Self::current_user_id`]. Ignored when no user
    /// is signed in.
    #[serde(default)]
    pub only_mine: bool,
    #[serde(default)]
    pub current_user_id: Option<String>,
    /// Restrict to a single municipality.
    #[serde(default)]
    pub municipality_id: Option<String>,
}

impl ReportFilter {
    /// Returns `true` if `report` passes every active filter.
    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&report.category) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&report.status) {
            return false;
        }
        if self.only_mine
            && let Some(uid) = &self.current_user_id
            && &report.author_id != uid
        {
            return false;
        }
        if let Some(municipality) = &self.municipality_id
            && report.municipality_id.as_ref() != Some(municipality)
        {
            return false;
        }
        true
    }

    /// Returns the reports that pass the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }

    /// Filters `reports` and projects the survivors onto [`ReportPoint`]s.
    #[must_use]
    pub fn points(&self, reports: &[Report]) -> Vec<ReportPoint> {
        self.apply(reports).into_iter().map(Report::to_point).collect()
    }

    /// Adds `category` to the selection, or removes it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    /// Adds `status` to the selection, or removes it if already selected.
    pub fn toggle_status(&mut self, status: &str) {
        if !self.statuses.remove(status) {
            self.statuses.insert(status.to_string());
        }
    }

    /// Resets the category, status, and "only mine" selections.
    ///
    /// The signed-in user and municipality are session state, not filter
    /// selections, so they are kept.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.statuses.clear();
        self.only_mine = false;
    }
}
