use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::evaluate::{evaluate, EvaluationResult};
use super::policy::{decide, EngineState};
use crate::catalog::MachineCatalog;
use crate::prelude::{LocationFix, NotificationSink, SettingsSource};
use crate::telemetry::{LogManager, MetricsRecorder};

/// What one location update produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decision {
    pub evaluation: EvaluationResult,
    pub messages: Vec<String>,
}

/// Owns the session's [`EngineState`] and runs evaluate + decide per fix.
///
/// Callers are responsible for feeding fixes in arrival order; see
/// [`super::actor::EngineHandle`] for a serialized wrapper.
pub struct ProximityEngine {
    state: EngineState,
    logger: LogManager,
    metrics: Arc<MetricsRecorder>,
}

impl ProximityEngine {
    pub fn new() -> Self {
        Self::with_state(EngineState::default())
    }

    pub fn with_state(state: EngineState) -> Self {
        Self {
            state,
            logger: LogManager::new("pennycore::proximity"),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    /// Evaluates `fix` and advances state. Returns `None` without touching
    /// state when the settings have notifications switched off.
    pub fn process(
        &mut self,
        fix: &LocationFix,
        catalog: &MachineCatalog,
        settings: &dyn SettingsSource,
    ) -> Option<Decision> {
        if !settings.notifications_enabled() {
            self.logger.debug(&format!(
                "notifications disabled, skipping fix ({:.5}, {:.5})",
                fix.latitude, fix.longitude
            ));
            return None;
        }

        self.state.search_radius_km = settings.search_radius_km();
        let evaluation = evaluate(fix, catalog, self.state.search_radius_km);
        self.logger.debug(&format!(
            "fix ({:.5}, {:.5}) radius {}km -> {} candidates",
            fix.latitude, fix.longitude, self.state.search_radius_km, evaluation.candidate_count
        ));

        let previous = std::mem::take(&mut self.state);
        let (state, messages) = decide(previous, &evaluation);
        self.state = state;

        self.metrics.record_evaluation(evaluation.candidate_count);
        self.metrics.record_notifications(messages.len());

        Some(Decision {
            evaluation,
            messages,
        })
    }

    /// [`Self::process`], then hands each message to `sink` in order.
    pub fn process_and_notify(
        &mut self,
        fix: &LocationFix,
        catalog: &MachineCatalog,
        settings: &dyn SettingsSource,
        sink: &dyn NotificationSink,
    ) -> Option<Decision> {
        let decision = self.process(fix, catalog, settings)?;
        for message in &decision.messages {
            self.logger.record(&format!("notify: {}", message));
            sink.deliver(message);
        }
        Some(decision)
    }
}

impl Default for ProximityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MachineRecord, VisitedStatus};
    use crate::settings::{SharedSettings, StaticSettings};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn zurich_catalog() -> MachineCatalog {
        MachineCatalog::new(vec![MachineRecord::new("1", 47.0, 8.0).with_title("Lindenhof")])
    }

    #[test]
    fn first_fix_fires_both_rules_then_goes_quiet() {
        let mut engine = ProximityEngine::new();
        let catalog = zurich_catalog();
        let settings = StaticSettings::new(20.0);
        let sink = RecordingSink::default();
        let fix = LocationFix::new(47.001, 8.001);

        let first = engine
            .process_and_notify(&fix, &catalog, &settings, &sink)
            .unwrap();
        assert_eq!(first.evaluation.candidate_count, 1);
        assert_eq!(first.messages.len(), 2);

        let second = engine
            .process_and_notify(&fix, &catalog, &settings, &sink)
            .unwrap();
        assert!(second.messages.is_empty());

        let delivered = sink.messages.lock().unwrap().clone();
        assert_eq!(
            delivered,
            vec![
                "There are 1 machines nearby. The closest is 0.1km away Lindenhof".to_string(),
                "You are very close to a Penny! It is only 0.1km away Lindenhof".to_string(),
            ]
        );
        assert_eq!(engine.metrics().snapshot().notifications, 2);
        assert_eq!(engine.metrics().snapshot().evaluations, 2);
    }

    #[test]
    fn empty_catalog_is_silent() {
        let mut engine = ProximityEngine::new();
        let decision = engine
            .process(
                &LocationFix::new(47.0, 8.0),
                &MachineCatalog::default(),
                &StaticSettings::default(),
            )
            .unwrap();
        assert_eq!(decision.evaluation.candidate_count, 0);
        assert!(decision.messages.is_empty());
    }

    #[test]
    fn radius_is_read_fresh_each_update() {
        let mut engine = ProximityEngine::new();
        let catalog = MachineCatalog::new(vec![MachineRecord::new("1", 47.1, 8.0)]);
        let settings = SharedSettings::new(1.0, true);
        let fix = LocationFix::new(47.0, 8.0);

        let narrow = engine.process(&fix, &catalog, &settings).unwrap();
        assert_eq!(narrow.evaluation.candidate_count, 0);

        settings.set_search_radius_km(20.0);
        let wide = engine.process(&fix, &catalog, &settings).unwrap();
        assert_eq!(wide.evaluation.candidate_count, 1);
        assert_eq!(engine.state().search_radius_km, 20.0);
    }

    #[test]
    fn disabled_notifications_leave_state_untouched() {
        let mut engine = ProximityEngine::new();
        let catalog = zurich_catalog();
        let settings = SharedSettings::new(20.0, false);
        let fix = LocationFix::new(47.001, 8.001);

        assert!(engine.process(&fix, &catalog, &settings).is_none());
        assert!(engine.state().previously_nearby_ids.is_empty());

        settings.set_notifications_enabled(true);
        let decision = engine.process(&fix, &catalog, &settings).unwrap();
        assert_eq!(decision.messages.len(), 2);
    }

    #[test]
    fn marking_visited_drops_machine_from_candidates() {
        let mut engine = ProximityEngine::new();
        let mut catalog = zurich_catalog();
        let settings = StaticSettings::default();
        let fix = LocationFix::new(47.001, 8.001);

        engine.process(&fix, &catalog, &settings);
        catalog.set_status("1", VisitedStatus::Visited);
        let decision = engine.process(&fix, &catalog, &settings).unwrap();
        assert_eq!(decision.evaluation.candidate_count, 0);
        assert!(engine.state().previously_nearby_ids.is_empty());
    }
}
