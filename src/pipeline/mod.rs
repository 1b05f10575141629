//! Pipeline components: relays, stage seam, fan-out pool, executor.

pub mod context;
pub mod error_handler;
pub mod fan_out;
pub mod orchestrator;
pub mod relay;
pub mod stage;

pub use context::PipelineTuning;
pub use error_handler::join_stage_handles;
pub use fan_out::run_fan_out;
pub use orchestrator::{execute_pipeline, run_pipeline};
pub use relay::{closed_relay, drain, relay};
pub use stage::Stage;
