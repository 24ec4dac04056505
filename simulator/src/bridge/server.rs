use crate::bridge::model::{BridgeModel, SettingsUpdate};
use pennycore::settings::SharedSettings;
use pennycore::{
    EngineHandle, LocationFix, MachineCatalog, NotificationSink, ProximityEngine, VisitedStatus,
};
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
};
use warp::{http::StatusCode, Filter, Rejection, Reply};

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

#[derive(Debug, Deserialize)]
struct StatusEdit {
    id: String,
    status: VisitedStatus,
}

/// Records delivered notifications for `GET /state` and echoes them.
pub struct BridgeSink {
    state: Arc<RwLock<BridgeModel>>,
}

impl NotificationSink for BridgeSink {
    fn deliver(&self, message: &str) {
        println!("[BRIDGE] {}", message);
        if let Ok(mut guard) = self.state.write() {
            guard.push_message(message);
        }
    }
}

/// Everything the HTTP handlers share.
#[derive(Clone)]
pub struct BridgeContext {
    engine: EngineHandle,
    settings: Arc<SharedSettings>,
    state: Arc<RwLock<BridgeModel>>,
}

impl BridgeContext {
    /// Spawns the engine task; must be called inside a tokio runtime.
    pub fn start(catalog: MachineCatalog, settings: Arc<SharedSettings>) -> Self {
        let state = Arc::new(RwLock::new(BridgeModel::default()));
        let sink = Arc::new(BridgeSink {
            state: state.clone(),
        });
        let engine = EngineHandle::spawn(ProximityEngine::new(), catalog, settings.clone(), sink);
        Self {
            engine,
            settings,
            state,
        }
    }

    fn snapshot(&self) -> BridgeModel {
        let mut model = self
            .state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        model.settings = self.settings.snapshot();
        model
    }
}

/// `POST /fix`, `GET /state`, `POST /settings`, `POST /status`.
pub fn routes(
    context: BridgeContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let context_filter = warp::any().map(move || context.clone());

    let fix_route = warp::path("fix")
        .and(warp::post())
        .and(warp::body::json())
        .and(context_filter.clone())
        .and_then(handle_fix);

    let state_route = warp::path("state")
        .and(warp::get())
        .and(context_filter.clone())
        .map(|context: BridgeContext| warp::reply::json(&context.snapshot()));

    let settings_route = warp::path("settings")
        .and(warp::post())
        .and(warp::body::json())
        .and(context_filter.clone())
        .map(|update: SettingsUpdate, context: BridgeContext| {
            if let Some(radius) = update.search_radius_km {
                context.settings.set_search_radius_km(radius);
            }
            if let Some(enabled) = update.notifications_enabled {
                context.settings.set_notifications_enabled(enabled);
            }
            log::info!("settings updated: {:?}", context.settings.snapshot());
            warp::reply::json(&context.settings.snapshot())
        });

    let status_route = warp::path("status")
        .and(warp::post())
        .and(warp::body::json())
        .and(context_filter)
        .and_then(handle_status);

    fix_route.or(state_route).or(settings_route).or(status_route)
}

async fn handle_fix(fix: LocationFix, context: BridgeContext) -> Result<impl Reply, Rejection> {
    let decision = context.engine.submit(fix).await.map_err(|err| {
        log::error!("fix error: {}", err);
        warp::reject::custom(BridgeError)
    })?;
    let (_, metrics) = context.engine.state().await.map_err(|err| {
        log::error!("state error: {}", err);
        warp::reject::custom(BridgeError)
    })?;

    if let Ok(mut guard) = context.state.write() {
        guard.last_fix = Some(fix);
        guard.metrics = metrics;
        if let Some(decision) = decision.as_ref() {
            guard.last_evaluation = Some(decision.evaluation.clone());
        }
    }

    let body = match decision {
        Some(decision) => json!({"status": "ok", "decision": decision}),
        None => json!({"status": "skipped", "reason": "notifications disabled"}),
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::OK))
}

async fn handle_status(edit: StatusEdit, context: BridgeContext) -> Result<impl Reply, Rejection> {
    let updated = context
        .engine
        .set_status(&edit.id, edit.status)
        .await
        .map_err(|err| {
            log::error!("status error: {}", err);
            warp::reject::custom(BridgeError)
        })?;
    let code = if updated {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"id": edit.id, "updated": updated})),
        code,
    ))
}

pub async fn serve(context: BridgeContext, address: SocketAddr) {
    log::info!("bridge listening on http://{}", address);
    warp::serve(routes(context)).run(address).await;
}
