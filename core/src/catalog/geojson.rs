//! Reader for the PennyMe `FeatureCollection` machine dump.
//!
//! Each feature carries a `Point` geometry with `[longitude, latitude]`
//! coordinates and a property bag with at least `id` and `name`.

use serde::Deserialize;
use serde_json::Value;

use super::record::{MachineRecord, MachineStatus, VisitedStatus};
use super::{CatalogError, CatalogResult};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    id: Option<Value>,
    #[serde(default)]
    name: String,
    machine_status: Option<String>,
    status: Option<VisitedStatus>,
}

/// Parses features into records in file order. Sorting is left to
/// [`super::MachineCatalog::new`].
pub fn parse_records(contents: &str) -> CatalogResult<Vec<MachineRecord>> {
    let collection: FeatureCollection = serde_json::from_str(contents)?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| feature_to_record(index, feature))
        .collect()
}

fn feature_to_record(index: usize, feature: Feature) -> CatalogResult<MachineRecord> {
    let invalid = |reason: &str| CatalogError::InvalidFeature {
        index,
        reason: reason.to_string(),
    };

    if feature.geometry.kind != "Point" {
        return Err(invalid("geometry is not a Point"));
    }
    let (longitude, latitude) = match feature.geometry.coordinates.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => return Err(invalid("point needs two coordinates")),
    };

    let id = match feature.properties.id {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return Err(invalid("missing id")),
    };

    Ok(MachineRecord {
        id,
        latitude,
        longitude,
        visited_status: feature.properties.status.unwrap_or_default(),
        title: feature.properties.name,
        machine_status: feature
            .properties
            .machine_status
            .as_deref()
            .map(MachineStatus::from_label)
            .unwrap_or_default(),
    })
}
