use std::sync::Mutex;

use serde::Serialize;

/// Counters for a running engine.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub evaluations: usize,
    pub candidates: usize,
    pub notifications: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_evaluation(&self, candidates: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.evaluations += 1;
            metrics.candidates += candidates;
        }
    }

    pub fn record_notifications(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.notifications += count;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
