//! voxflow - Staged request pipeline for voice interaction platforms
//!
//! A fixed sequence of processing phases (classification, session handling,
//! speech recognition, language understanding, synthesis, response) that an
//! inbound request flows through, with per-phase extension handlers and a
//! kind gate that silently skips requests meant for another pipeline.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod builder;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod transport;

// Request data model
pub use context::{AppKind, AudioData, AudioPayload, OutputAction, RawRequest, RequestContext};

// Pipeline
pub use pipeline::{
    EventSink, FnHandler, HandlerRegistry, Outcome, Phase, PhaseGate, PhaseHandler, Pipeline,
    PipelineConfig, PipelineEvent, event_channel,
};

// Response delivery
pub use transport::{CollectorTransport, ResponseTransport, StdoutTransport};

// Audio payload codec
pub use audio::{decode_samples, encode_samples, samples_from_wav};

// Builders
pub use builder::{RequestBuilder, ResponseBuilder};

// Error handling
pub use error::{Result, VoxflowError};

// Config
pub use config::{Config, merge_handler_config};
