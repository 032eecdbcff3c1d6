//! Staged request pipeline.
//!
//! A fixed, named sequence of phases that every inbound request flows
//! through, with a kind gate that short-circuits requests belonging to a
//! different pipeline. Handlers registered per phase are the extension
//! point; the sequencing itself never changes.

pub mod event;
pub mod gate;
pub mod handler;
pub mod orchestrator;
pub mod phase;

pub use event::{EventSink, PipelineEvent, event_channel};
pub use gate::PhaseGate;
pub use handler::{FnHandler, HandlerRegistry, PhaseHandler};
pub use orchestrator::{Outcome, Pipeline, PipelineConfig};
pub use phase::Phase;
