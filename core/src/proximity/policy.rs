use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::evaluate::EvaluationResult;
use crate::prelude::DEFAULT_SEARCH_RADIUS_KM;

/// Closest-machine distance below which the one-time "very close" alert fires.
pub const CLOSE_NOTIFY_DISTANCE_KM: f64 = 0.3;

/// Notification memory carried from one location update to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub search_radius_km: f64,
    pub previously_nearby_ids: HashSet<String>,
    pub last_notified_close_id: Option<String>,
}

impl EngineState {
    pub fn new(search_radius_km: f64) -> Self {
        Self {
            search_radius_km,
            previously_nearby_ids: HashSet::new(),
            last_notified_close_id: None,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_RADIUS_KM)
    }
}

/// Applies both notification rules to one evaluation.
///
/// Rule A fires when `found_ids` contains an id absent from the previous
/// update; the nearby set is replaced unconditionally. Rule B fires once per
/// distinct closest machine within [`CLOSE_NOTIFY_DISTANCE_KM`]. Messages come
/// back in rule order.
pub fn decide(previous: EngineState, result: &EvaluationResult) -> (EngineState, Vec<String>) {
    let mut state = previous;
    let mut messages = Vec::new();

    if let Some(closest) = result.closest.as_ref().filter(|_| result.candidate_count > 0) {
        let distance = format_km(closest.distance_km);

        let has_newcomer = result
            .found_ids
            .iter()
            .any(|id| !state.previously_nearby_ids.contains(id));
        if has_newcomer {
            messages.push(with_title(
                format!(
                    "There are {} machines nearby. The closest is {}km away",
                    result.candidate_count, distance
                ),
                &closest.title,
            ));
        }

        let already_told = state.last_notified_close_id.as_deref() == Some(closest.id.as_str());
        if closest.distance_km < CLOSE_NOTIFY_DISTANCE_KM && !already_told {
            messages.push(with_title(
                format!("You are very close to a Penny! It is only {}km away", distance),
                &closest.title,
            ));
            state.last_notified_close_id = Some(closest.id.clone());
        }
    }

    state.previously_nearby_ids = result.found_ids.iter().cloned().collect();
    (state, messages)
}

/// Rounds half away from zero to one decimal before printing.
fn format_km(distance_km: f64) -> String {
    format!("{:.1}", (distance_km * 10.0).round() / 10.0)
}

fn with_title(mut message: String, title: &str) -> String {
    if !title.is_empty() {
        message.push(' ');
        message.push_str(title);
    }
    message
}
