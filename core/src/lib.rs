//! Proximity core for the PennyMe machine map.
//!
//! Given a latitude-sorted catalog of penny press machines and a stream of
//! location fixes, the engine finds unvisited machines within the search
//! radius and decides when a "nearby" or "very close" notification is due.

pub mod catalog;
pub mod geo;
pub mod prelude;
pub mod proximity;
pub mod settings;
pub mod telemetry;

pub use catalog::{MachineCatalog, MachineRecord, MachineStatus, VisitedStatus};
pub use prelude::{LocationFix, LocationSource, NotificationSink, SettingsSource};
pub use proximity::{Decision, EngineHandle, EngineState, EvaluationResult, ProximityEngine};
