//! Single-writer task that owns a [`ProximityEngine`].
//!
//! Every fix, catalog replacement and status edit goes through one mpsc
//! channel, so concurrent callers observe updates in arrival order.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::engine::{Decision, ProximityEngine};
use super::policy::EngineState;
use crate::catalog::{MachineCatalog, VisitedStatus};
use crate::prelude::{LocationFix, NotificationSink, SettingsSource};
use crate::telemetry::MetricsSnapshot;

const COMMAND_BUFFER: usize = 64;

#[derive(thiserror::Error, Debug)]
pub enum ActorError {
    #[error("engine task has stopped")]
    Closed,
}

enum Command {
    Fix {
        fix: LocationFix,
        reply: oneshot::Sender<Option<Decision>>,
    },
    ReplaceCatalog(MachineCatalog),
    SetStatus {
        id: String,
        status: VisitedStatus,
        reply: oneshot::Sender<bool>,
    },
    State(oneshot::Sender<(EngineState, MetricsSnapshot)>),
}

/// Cloneable front door to the engine task.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
}

impl EngineHandle {
    /// Spawns the engine task on the current tokio runtime.
    pub fn spawn(
        engine: ProximityEngine,
        catalog: MachineCatalog,
        settings: Arc<dyn SettingsSource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(run(engine, catalog, settings, sink, rx));
        Self { tx }
    }

    pub async fn submit(&self, fix: LocationFix) -> Result<Option<Decision>, ActorError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Fix { fix, reply }).await?;
        response.await.map_err(|_| ActorError::Closed)
    }

    pub async fn replace_catalog(&self, catalog: MachineCatalog) -> Result<(), ActorError> {
        self.send(Command::ReplaceCatalog(catalog)).await
    }

    pub async fn set_status(&self, id: &str, status: VisitedStatus) -> Result<bool, ActorError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::SetStatus {
            id: id.to_string(),
            status,
            reply,
        })
        .await?;
        response.await.map_err(|_| ActorError::Closed)
    }

    pub async fn state(&self) -> Result<(EngineState, MetricsSnapshot), ActorError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::State(reply)).await?;
        response.await.map_err(|_| ActorError::Closed)
    }

    async fn send(&self, command: Command) -> Result<(), ActorError> {
        self.tx.send(command).await.map_err(|_| ActorError::Closed)
    }
}

async fn run(
    mut engine: ProximityEngine,
    mut catalog: MachineCatalog,
    settings: Arc<dyn SettingsSource>,
    sink: Arc<dyn NotificationSink>,
    mut rx: mpsc::Receiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Fix { fix, reply } => {
                let decision =
                    engine.process_and_notify(&fix, &catalog, settings.as_ref(), sink.as_ref());
                let _ = reply.send(decision);
            }
            Command::ReplaceCatalog(replacement) => {
                log::info!("catalog replaced ({} machines)", replacement.len());
                catalog = replacement;
            }
            Command::SetStatus { id, status, reply } => {
                let _ = reply.send(catalog.set_status(&id, status));
            }
            Command::State(reply) => {
                let _ = reply.send((engine.state().clone(), engine.metrics().snapshot()));
            }
        }
    }
    log::debug!("engine task stopped");
}
