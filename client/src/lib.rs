pub mod backoff;
pub mod engine;
pub mod network;
pub mod prediction;

pub use backoff::Backoff;
pub use engine::{ClientSnapshot, ReconciliationEngine, RenderState};
