//! Presentation hints for drawing density overlays.
//!
//! The density transform only decides color, opacity and radius. These hints
//! describe how a renderer layers each circle: a soft glow behind the fill,
//! a faint white outline and additive blending.

use buurtkompas_heatmap_models::{DensityOverlay, Rgb};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Compositing mode for overlapping circles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlendMode {
    /// Additive: overlapping circles brighten toward white.
    #[default]
    Lighter,
    SourceOver,
}

/// Layering parameters shared by every circle in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayStyle {
    /// Glow opacity as a fraction of the fill opacity.
    pub glow_alpha_factor: f64,
    /// Glow radius as a multiple of the fill radius.
    pub glow_radius_factor: f64,
    /// Opacity of the white outline.
    pub outline_alpha: f64,
    /// Circles are drawn at least this many screen pixels across.
    pub min_pixel_radius: f64,
    pub blend_mode: BlendMode,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            glow_alpha_factor: 0.25,
            glow_radius_factor: 1.5,
            outline_alpha: 0.15,
            min_pixel_radius: 24.0,
            blend_mode: BlendMode::Lighter,
        }
    }
}

/// Fully resolved paint instructions for one overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CirclePaint {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub glow_color: String,
    pub glow_opacity: f64,
    pub glow_radius_meters: f64,
    pub outline_color: String,
    pub outline_opacity: f64,
}

impl OverlayStyle {
    /// Paint instructions for `overlay` under this style.
    #[must_use]
    pub fn paint(&self, overlay: &DensityOverlay) -> CirclePaint {
        let fill = overlay.color_stop.to_hex();
        CirclePaint {
            glow_color: fill.clone(),
            fill_color: fill,
            fill_opacity: overlay.alpha,
            glow_opacity: overlay.alpha * self.glow_alpha_factor,
            glow_radius_meters: overlay.radius_meters * self.glow_radius_factor,
            outline_color: Rgb::new(1.0, 1.0, 1.0).to_hex(),
            outline_opacity: self.outline_alpha,
        }
    }

    /// Screen radius for a circle of `radius_meters` at `meters_per_pixel`,
    /// never below `min_pixel_radius`.
    #[must_use]
    pub fn pixel_radius(&self, radius_meters: f64, meters_per_pixel: f64) -> f64 {
        if meters_per_pixel > 0.0 {
            (radius_meters / meters_per_pixel).max(self.min_pixel_radius)
        } else {
            self.min_pixel_radius
        }
    }
}

#[cfg(test)]
mod tests {
    use buurtkompas_geo_models::GeoPoint;

    use super::*;

    fn overlay() -> DensityOverlay {
        DensityOverlay {
            report_id: "r1".into(),
            center: GeoPoint::new(51.69, 5.30).unwrap(),
            radius_meters: 200.0,
            color_stop: Rgb::new(0.95, 0.35, 0.25),
            alpha: 0.8,
            score: 1.0,
            neighbor_count: 3,
        }
    }

    #[test]
    fn paint_applies_glow_and_outline() {
        let paint = OverlayStyle::default().paint(&overlay());
        assert_eq!(paint.fill_color, "#f25940");
        assert_eq!(paint.glow_color, paint.fill_color);
        assert!((paint.fill_opacity - 0.8).abs() < 1e-12);
        assert!((paint.glow_opacity - 0.2).abs() < 1e-12);
        assert!((paint.glow_radius_meters - 300.0).abs() < 1e-12);
        assert_eq!(paint.outline_color, "#ffffff");
        assert!((paint.outline_opacity - 0.15).abs() < 1e-12);
    }

    #[test]
    fn pixel_radius_has_floor() {
        let style = OverlayStyle::default();
        assert!((style.pixel_radius(200.0, 2.0) - 100.0).abs() < 1e-12);
        assert!((style.pixel_radius(200.0, 100.0) - 24.0).abs() < 1e-12);
        assert!((style.pixel_radius(200.0, 0.0) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn blend_mode_strings() {
        assert_eq!(BlendMode::Lighter.as_ref(), "lighter");
        assert_eq!(
            "source_over".parse::<BlendMode>().unwrap(),
            BlendMode::SourceOver
        );
    }
}
