//! Output encoders.
//!
//! `GeoJSON` output places every hotspot or overlay as a `Point` feature at
//! its center (`[longitude, latitude]`). Overlay features carry resolved
//! paint properties so a web map can style them without recomputing the
//! color ramp.

use buurtkompas_geo_models::GeoPoint;
use buurtkompas_heatmap::{DensityOverlay, OverlayStyle};
use buurtkompas_hotspot_models::Hotspot;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use serde::Serialize;
use serde_json::json;

use crate::CliError;

fn point_geometry(point: GeoPoint) -> Geometry {
    Geometry::new(Value::Point(vec![point.longitude(), point.latitude()]))
}

fn point_feature(id: &str, point: GeoPoint, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(point_geometry(point)),
        id: Some(Id::String(id.to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Hotspots as a feature collection, in ranking order.
#[must_use]
pub fn hotspots_to_geojson(hotspots: &[Hotspot]) -> FeatureCollection {
    let features = hotspots
        .iter()
        .map(|hotspot| {
            let mut properties = JsonObject::new();
            properties.insert("count".to_string(), json!(hotspot.count));
            properties.insert("topCategory".to_string(), json!(hotspot.top_category));
            properties.insert("cellLat".to_string(), json!(hotspot.cell.lat_cell));
            properties.insert("cellLon".to_string(), json!(hotspot.cell.lon_cell));
            point_feature(&hotspot.id, hotspot.center, properties)
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Density overlays as a feature collection, painted with `style`.
///
/// The collection carries a `blendMode` member telling the renderer how to
/// composite overlapping circles.
#[must_use]
pub fn overlays_to_geojson(overlays: &[DensityOverlay], style: &OverlayStyle) -> FeatureCollection {
    let features = overlays
        .iter()
        .map(|overlay| {
            let paint = style.paint(overlay);
            let mut properties = JsonObject::new();
            properties.insert("reportId".to_string(), json!(overlay.report_id));
            properties.insert("radiusMeters".to_string(), json!(overlay.radius_meters));
            properties.insert("score".to_string(), json!(overlay.score));
            properties.insert("neighborCount".to_string(), json!(overlay.neighbor_count));
            properties.insert("fillColor".to_string(), json!(paint.fill_color));
            properties.insert("fillOpacity".to_string(), json!(paint.fill_opacity));
            properties.insert("glowColor".to_string(), json!(paint.glow_color));
            properties.insert("glowOpacity".to_string(), json!(paint.glow_opacity));
            properties.insert(
                "glowRadiusMeters".to_string(),
                json!(paint.glow_radius_meters),
            );
            properties.insert("outlineColor".to_string(), json!(paint.outline_color));
            properties.insert("outlineOpacity".to_string(), json!(paint.outline_opacity));
            point_feature(&overlay.report_id, overlay.center, properties)
        })
        .collect();

    let mut members = JsonObject::new();
    members.insert("blendMode".to_string(), json!(style.blend_mode.as_ref()));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(members),
    }
}

/// Pretty-printed JSON for any serializable result.
///
/// # Errors
///
/// Returns [`CliError::Json`] if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use buurtkompas_heatmap::Rgb;
    use buurtkompas_hotspot_models::BucketKey;

    use super::*;

    fn hotspot() -> Hotspot {
        let cell = BucketKey {
            lat_cell: 10288,
            lon_cell: 1094,
        };
        Hotspot {
            id: cell.id(),
            cell,
            center: cell.center(0.005).unwrap(),
            count: 3,
            top_category: Some("verkeer".to_string()),
        }
    }

    fn overlay() -> DensityOverlay {
        DensityOverlay {
            report_id: "r1".to_string(),
            center: GeoPoint::new(51.44, 5.47).unwrap(),
            radius_meters: 260.0,
            color_stop: Rgb::new(0.0, 0.22, 0.60),
            alpha: 0.4,
            score: 0.25,
            neighbor_count: 2,
        }
    }

    #[test]
    fn hotspot_feature_shape() {
        let value = serde_json::to_value(hotspots_to_geojson(&[hotspot()])).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "Point");
        let coords = feature["geometry"]["coordinates"].as_array().unwrap();
        assert!((coords[0].as_f64().unwrap() - 5.47).abs() < 1e-9);
        assert!((coords[1].as_f64().unwrap() - 51.44).abs() < 1e-9);
        assert_eq!(feature["properties"]["count"], 3);
        assert_eq!(feature["properties"]["topCategory"], "verkeer");
        assert_eq!(feature["properties"]["cellLat"], 10288);
    }

    #[test]
    fn overlay_feature_carries_paint() {
        let collection = overlays_to_geojson(&[overlay()], &OverlayStyle::default());
        let value = serde_json::to_value(collection).unwrap();
        assert_eq!(value["blendMode"], "lighter");
        let properties = &value["features"][0]["properties"];
        assert_eq!(properties["reportId"], "r1");
        assert_eq!(properties["fillColor"], "#003899");
        assert_eq!(properties["outlineColor"], "#ffffff");
        assert!((properties["glowOpacity"].as_f64().unwrap() - 0.1).abs() < 1e-12);
        assert!((properties["glowRadiusMeters"].as_f64().unwrap() - 390.0).abs() < 1e-9);
    }

    #[test]
    fn empty_collections() {
        let value = serde_json::to_value(hotspots_to_geojson(&[])).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn json_output_uses_camel_case() {
        let text = to_json(&[overlay()]).unwrap();
        assert!(text.contains("\"reportId\""));
        assert!(text.contains("\"neighborCount\""));
    }
}
