use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use pennycore::settings::SharedSettings;
use pennycore::telemetry::MetricsSnapshot;
use pennycore::{LocationFix, LocationSource, MachineCatalog, NotificationSink, ProximityEngine};
use serde::Serialize;

/// Prints notifications the way a device banner would show them.
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn deliver(&self, message: &str) {
        println!("[NOTIFY] {}", message);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub fix: LocationFix,
    pub candidate_count: usize,
    pub closest_id: Option<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub steps: Vec<StepReport>,
    pub metrics: MetricsSnapshot,
}

impl WorkflowResult {
    pub fn notification_count(&self) -> usize {
        self.steps.iter().map(|step| step.messages.len()).sum()
    }
}

/// Replays a track of fixes against one catalog with one engine session.
pub struct Runner {
    catalog: MachineCatalog,
    settings: SharedSettings,
    engine: ProximityEngine,
}

impl Runner {
    pub fn new(config: &WorkflowConfig, catalog: MachineCatalog) -> Self {
        Self {
            catalog,
            settings: config.to_settings(),
            engine: ProximityEngine::new(),
        }
    }

    pub fn from_config(config: &WorkflowConfig) -> anyhow::Result<Self> {
        let path = config
            .catalog
            .as_ref()
            .context("no catalog configured (use --catalog or `catalog:` in the workflow)")?;
        let catalog = MachineCatalog::load_geojson(path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        log::info!("loaded {} machines from {}", catalog.len(), path.display());
        Ok(Self::new(config, catalog))
    }

    pub fn execute(
        &mut self,
        source: &mut dyn LocationSource,
        sink: &dyn NotificationSink,
    ) -> WorkflowResult {
        let mut steps = Vec::new();
        while let Some(fix) = source.next_fix() {
            let Some(decision) =
                self.engine
                    .process_and_notify(&fix, &self.catalog, &self.settings, sink)
            else {
                continue;
            };
            steps.push(StepReport {
                fix,
                candidate_count: decision.evaluation.candidate_count,
                closest_id: decision.evaluation.closest_id().map(str::to_string),
                messages: decision.messages,
            });
        }

        WorkflowResult {
            steps,
            metrics: self.engine.metrics().snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pennycore::MachineRecord;

    struct SilentSink;

    impl NotificationSink for SilentSink {
        fn deliver(&self, _message: &str) {}
    }

    fn catalog() -> MachineCatalog {
        MachineCatalog::new(vec![
            MachineRecord::new("1", 47.0, 8.0).with_title("Old Town"),
            MachineRecord::new("2", 47.3, 8.5).with_title("Lakeside"),
        ])
    }

    #[test]
    fn runner_replays_track_in_order() {
        let cfg = WorkflowConfig::from_args(None, 20.0);
        let mut runner = Runner::new(&cfg, catalog());
        let track = vec![
            LocationFix::new(47.001, 8.001),
            LocationFix::new(47.001, 8.001),
            LocationFix::new(47.299, 8.5),
        ];

        let result = runner.execute(&mut track.into_iter(), &SilentSink);
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[0].messages.len(), 2);
        assert!(result.steps[1].messages.is_empty());
        assert_eq!(result.steps[2].closest_id.as_deref(), Some("2"));
        assert_eq!(result.metrics.evaluations, 3);
        assert_eq!(result.notification_count(), result.metrics.notifications);
    }

    #[test]
    fn disabled_notifications_skip_every_step() {
        let mut cfg = WorkflowConfig::from_args(None, 20.0);
        cfg.notifications_enabled = false;
        let mut runner = Runner::new(&cfg, catalog());
        let track = vec![LocationFix::new(47.001, 8.001)];

        let result = runner.execute(&mut track.into_iter(), &SilentSink);
        assert!(result.steps.is_empty());
        assert_eq!(result.metrics.evaluations, 0);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let cfg = WorkflowConfig::default();
        assert!(Runner::from_config(&cfg).is_err());
    }
}
