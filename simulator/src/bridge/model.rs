use pennycore::settings::SettingsSnapshot;
use pennycore::telemetry::MetricsSnapshot;
use pennycore::{EvaluationResult, LocationFix};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Notifications kept for `GET /state`.
pub const RECENT_MESSAGE_LIMIT: usize = 50;

/// Snapshot served to HTTP clients.
#[derive(Debug, Clone, Serialize, Default)]
pub struct BridgeModel {
    pub last_fix: Option<LocationFix>,
    pub last_evaluation: Option<EvaluationResult>,
    pub recent_messages: VecDeque<String>,
    pub settings: SettingsSnapshot,
    pub metrics: MetricsSnapshot,
}

impl BridgeModel {
    pub fn push_message(&mut self, message: &str) {
        if self.recent_messages.len() == RECENT_MESSAGE_LIMIT {
            self.recent_messages.pop_front();
        }
        self.recent_messages.push_back(message.to_string());
    }
}

/// Partial settings update accepted by `POST /settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub search_radius_km: Option<f64>,
    pub notifications_enabled: Option<bool>,
}
