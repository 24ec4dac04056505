use serde::{Deserialize, Serialize};

use crate::catalog::MachineCatalog;
use crate::geo::{first_index_at_or_above, haversine_km, BoundingBox};
use crate::prelude::LocationFix;

/// Closest candidate found by an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosestMachine {
    pub id: String,
    pub title: String,
    pub distance_km: f64,
}

/// Outcome of scanning the catalog around one fix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub candidate_count: usize,
    pub closest: Option<ClosestMachine>,
    pub found_ids: Vec<String>,
}

impl EvaluationResult {
    /// `f64::INFINITY` when nothing was found.
    pub fn min_distance_km(&self) -> f64 {
        self.closest
            .as_ref()
            .map_or(f64::INFINITY, |closest| closest.distance_km)
    }

    pub fn closest_id(&self) -> Option<&str> {
        self.closest.as_ref().map(|closest| closest.id.as_str())
    }
}

/// Collects unvisited machines strictly within `radius_km` of `fix`.
///
/// The catalog must be sorted ascending by latitude. A degree-space box
/// narrows the scan to a latitude window via binary search; the haversine
/// distance then decides membership.
pub fn evaluate(fix: &LocationFix, catalog: &MachineCatalog, radius_km: f64) -> EvaluationResult {
    let center = fix.coordinate();
    let bounds = BoundingBox::around(center, radius_km);
    let records = catalog.records();
    let start = first_index_at_or_above(records, bounds.min_lat, |record| record.latitude);

    let mut result = EvaluationResult::default();
    for record in &records[start..] {
        if bounds.is_past(record.latitude) {
            break;
        }
        if !bounds.spans_longitude(record.longitude) || !record.is_unvisited() {
            continue;
        }

        let distance_km = haversine_km(center, record.coordinate());
        if distance_km < radius_km {
            result.candidate_count += 1;
            result.found_ids.push(record.id.clone());
            if distance_km < result.min_distance_km() {
                result.closest = Some(ClosestMachine {
                    id: record.id.clone(),
                    title: record.title.clone(),
                    distance_km,
                });
            }
        }
    }

    result
}
