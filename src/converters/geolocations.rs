//! Geo locations
//!
//! A `geoLocations` entry may carry a place, a point, a box and any number of
//! polygons. Polygon boundary points are written in input order without
//! deduplication or ring closure; the optional interior point follows them.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::{Error, Result};

use super::base::{as_list, as_object, push_text_child, required_text, wrap_list, Entry, MapContext};

/// Children of `<geoLocationBox>`, in schema order
pub const BOX_BOUNDS: [&str; 4] = [
    "westBoundLongitude",
    "eastBoundLongitude",
    "southBoundLatitude",
    "northBoundLatitude",
];

/// Children of a point element, in schema order
pub const POINT_COORDINATES: [&str; 2] = ["pointLongitude", "pointLatitude"];

/// A sub-field that is present and not `null`
fn present<'a>(entry: &'a Entry, key: &str) -> Option<&'a JsonValue> {
    entry.get(key).filter(|v| !v.is_null())
}

/// `geoLocations` field mapper
pub fn geo_locations(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    wrap_list("geoLocations", value, ctx, |item, ctx| {
        let entry = as_object(item, ctx)?;
        encode_geo_location(entry, ctx)
    })
}

fn encode_geo_location(entry: &Entry, ctx: &mut MapContext) -> Result<Element> {
    let mut location = Element::datacite("geoLocation");

    push_text_child(&mut location, "geoLocationPlace", entry, "geoLocationPlace", ctx)?;

    if let Some(point) = present(entry, "geoLocationPoint") {
        let point = ctx.scoped("geoLocationPoint", |ctx| {
            encode_coordinates("geoLocationPoint", &POINT_COORDINATES, point, ctx)
        })?;
        location.add_child(point);
    }

    if let Some(bounds) = present(entry, "geoLocationBox") {
        let bounds = ctx.scoped("geoLocationBox", |ctx| {
            encode_coordinates("geoLocationBox", &BOX_BOUNDS, bounds, ctx)
        })?;
        location.add_child(bounds);
    }

    if let Some(polygon) = present(entry, "geoLocationPolygon") {
        let polygon = ctx.scoped("geoLocationPolygon", |ctx| encode_polygon(polygon, ctx))?;
        location.children.extend(polygon);
    }

    if let Some(polygons) = present(entry, "geoLocationPolygons") {
        ctx.scoped("geoLocationPolygons", |ctx| {
            let items = as_list(polygons, ctx)?;
            for (index, polygon) in items.iter().enumerate() {
                let polygon = ctx.indexed(index, |ctx| encode_polygon(polygon, ctx))?;
                location.children.extend(polygon);
            }
            Ok(())
        })?;
    }

    Ok(location)
}

/// An element whose children are the named coordinates, all required
fn encode_coordinates(
    tag: &str,
    names: &[&str],
    value: &JsonValue,
    ctx: &mut MapContext,
) -> Result<Element> {
    let entry = as_object(value, ctx)?;
    let mut element = Element::datacite(tag);
    for name in names {
        let text = required_text(entry, name, ctx)?;
        element.add_child(Element::datacite(name).with_text(text));
    }
    Ok(element)
}

/// One `<geoLocationPolygon>`; an empty point list writes nothing
fn encode_polygon(value: &JsonValue, ctx: &mut MapContext) -> Result<Option<Element>> {
    let items = as_list(value, ctx)?;
    if items.is_empty() {
        return Ok(None);
    }

    let mut polygon = Element::datacite("geoLocationPolygon");
    let mut interior: Option<Element> = None;

    for (index, item) in items.iter().enumerate() {
        ctx.indexed(index, |ctx| {
            let entry = as_object(item, ctx)?;
            let boundary = present(entry, "polygonPoint");
            let inner = present(entry, "inPolygonPoint");
            if boundary.is_none() && inner.is_none() {
                return Err(Error::missing_field("polygonPoint", ctx.path()));
            }

            if let Some(point) = boundary {
                let point = ctx.scoped("polygonPoint", |ctx| {
                    encode_coordinates("polygonPoint", &POINT_COORDINATES, point, ctx)
                })?;
                polygon.add_child(point);
            }

            if let Some(point) = inner {
                if interior.is_some() {
                    return Err(Error::Value(format!(
                        "{}: polygon has more than one inPolygonPoint",
                        ctx.path()
                    )));
                }
                interior = Some(ctx.scoped("inPolygonPoint", |ctx| {
                    encode_coordinates("inPolygonPoint", &POINT_COORDINATES, point, ctx)
                })?);
            }
            Ok(())
        })?;
    }

    polygon.children.extend(interior);
    Ok(Some(polygon))
}

/// Coordinate text back to a JSON number; non-numeric text stays a string
pub fn number_or_text(text: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(text.trim()) {
        Ok(number @ JsonValue::Number(_)) => number,
        _ => JsonValue::String(text.to_string()),
    }
}

fn decode_coordinates(element: &Element, names: &[&str]) -> JsonValue {
    let mut out = Map::new();
    for name in names {
        if let Some(text) = element.child(name).and_then(Element::text) {
            out.insert(name.to_string(), number_or_text(text));
        }
    }
    JsonValue::Object(out)
}

fn decode_polygon(polygon: &Element) -> JsonValue {
    let mut points = Vec::new();
    for child in &polygon.children {
        let key = child.local_name();
        if key == "polygonPoint" || key == "inPolygonPoint" {
            let mut entry = Map::new();
            entry.insert(key.to_string(), decode_coordinates(child, &POINT_COORDINATES));
            points.push(JsonValue::Object(entry));
        }
    }
    JsonValue::Array(points)
}

/// Read `<geoLocation>` elements back into entries
pub fn decode_geo_locations(wrapper: &Element) -> Vec<JsonValue> {
    wrapper
        .find_children("geoLocation")
        .into_iter()
        .map(|location| {
            let mut entry = Map::new();
            if let Some(place) = location.child("geoLocationPlace").and_then(Element::text) {
                entry.insert("geoLocationPlace".to_string(), JsonValue::String(place.to_string()));
            }
            if let Some(point) = location.child("geoLocationPoint") {
                entry.insert(
                    "geoLocationPoint".to_string(),
                    decode_coordinates(point, &POINT_COORDINATES),
                );
            }
            if let Some(bounds) = location.child("geoLocationBox") {
                entry.insert("geoLocationBox".to_string(), decode_coordinates(bounds, &BOX_BOUNDS));
            }

            let mut polygons: Vec<JsonValue> = location
                .find_children("geoLocationPolygon")
                .into_iter()
                .map(decode_polygon)
                .collect();
            match polygons.len() {
                0 => {}
                1 => {
                    entry.insert("geoLocationPolygon".to_string(), polygons.remove(0));
                }
                _ => {
                    entry.insert("geoLocationPolygons".to_string(), JsonValue::Array(polygons));
                }
            }

            JsonValue::Object(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: JsonValue) -> Result<Vec<Element>> {
        let mut ctx = MapContext::new();
        ctx.scoped("geoLocations", |ctx| geo_locations(&value, ctx))
    }

    fn polygon_entry(lon: f64, lat: f64) -> JsonValue {
        json!({"polygonPoint": {"pointLongitude": lon, "pointLatitude": lat}})
    }

    #[test]
    fn test_numeric_rendering() {
        let out = map(json!([{"geoLocationPoint": {"pointLongitude": 31.12, "pointLatitude": 67}}]))
            .unwrap();
        let point = out[0].select("geoLocation/geoLocationPoint")[0];
        assert_eq!(point.child("pointLongitude").and_then(Element::text), Some("31.12"));
        assert_eq!(point.child("pointLatitude").and_then(Element::text), Some("67"));
    }

    #[test]
    fn test_interior_point_written_last() {
        let out = map(json!([{"geoLocationPolygon": [
            polygon_entry(-71.032, 41.090),
            {"inPolygonPoint": {"pointLongitude": -52.032, "pointLatitude": 12.090}},
            polygon_entry(-68.211, 42.893),
            polygon_entry(-72.032, 39.090),
            polygon_entry(-71.032, 41.090)
        ]}]))
        .unwrap();

        let polygon = out[0].select("geoLocation/geoLocationPolygon")[0];
        let tags: Vec<_> = polygon.children.iter().map(|c| c.local_name()).collect();
        assert_eq!(
            tags,
            vec!["polygonPoint", "polygonPoint", "polygonPoint", "polygonPoint", "inPolygonPoint"]
        );
        // closing point kept verbatim
        assert_eq!(polygon.children[0], polygon.children[3]);
        assert_eq!(
            polygon.children[4].child("pointLatitude").and_then(Element::text),
            Some("12.09")
        );
    }

    #[test]
    fn test_two_interior_points_rejected() {
        let inner = json!({"inPolygonPoint": {"pointLongitude": 1, "pointLatitude": 2}});
        let err = map(json!([{"geoLocationPolygon": [inner.clone(), inner]}])).unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }

    #[test]
    fn test_box_requires_all_bounds() {
        let err = map(json!([{"geoLocationBox": {"westBoundLongitude": 1}}])).unwrap_err();
        match err {
            Error::MissingField { field, path } => {
                assert_eq!(field, "eastBoundLongitude");
                assert_eq!(path, "geoLocations[0].geoLocationBox");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multiple_polygons_roundtrip() {
        let ring = json!([
            polygon_entry(1.5, 2.0),
            polygon_entry(3.0, 4.5),
            polygon_entry(5.0, 6.0),
            polygon_entry(1.5, 2.0)
        ]);
        let entry = json!({"geoLocationPlace": "Here", "geoLocationPolygons": [ring.clone(), ring]});
        let out = map(json!([entry.clone()])).unwrap();
        assert_eq!(out[0].select("geoLocation/geoLocationPolygon").len(), 2);
        assert_eq!(decode_geo_locations(&out[0]), vec![entry]);
    }

    #[test]
    fn test_number_or_text() {
        assert_eq!(number_or_text("41.090"), json!(41.09));
        assert_eq!(number_or_text("67"), json!(67));
        assert_eq!(number_or_text("north"), json!("north"));
    }
}
