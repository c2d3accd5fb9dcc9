pub mod orchestrator;
pub mod worker;

pub use orchestrator::{Orchestrator, DEFAULT_CONCURRENCY};
