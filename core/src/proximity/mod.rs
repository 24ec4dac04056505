pub mod actor;
pub mod engine;
pub mod evaluate;
pub mod policy;

pub use actor::{ActorError, EngineHandle};
pub use engine::{Decision, ProximityEngine};
pub use evaluate::{evaluate, ClosestMachine, EvaluationResult};
pub use policy::{decide, EngineState, CLOSE_NOTIFY_DISTANCE_KM};
