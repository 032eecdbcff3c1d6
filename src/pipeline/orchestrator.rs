//! Request orchestrator: runs the fixed phase sequence for one request.
//!
//! The pipeline owns no per-request state. Each inbound request gets its
//! own [`RequestContext`]; phases run strictly in order, each gated phase
//! behind a kind check, and the final response field is handed to the
//! transport. Multiple requests may be handled concurrently on the same
//! pipeline instance.

use crate::config::merge_handler_config;
use crate::context::{AppKind, RawRequest, RequestContext};
use crate::defaults::DEFAULT_APP_KIND;
use crate::error::Result;
use crate::pipeline::event::{EventSink, PipelineEvent};
use crate::pipeline::gate::PhaseGate;
use crate::pipeline::handler::HandlerRegistry;
use crate::pipeline::phase::Phase;
use crate::transport::ResponseTransport;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Configuration for the request pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Application kind this pipeline handles. The gate admits only
    /// requests classified with this kind.
    pub app_kind: AppKind,
    /// Verbosity level (0=silent, 1=request milestones, 2=per-phase diagnostics)
    pub verbosity: u8,
    /// Suppress diagnostic messages entirely
    pub quiet: bool,
    /// Handler-name overrides merged into the owning application's handler
    /// configuration at install time (override wins on key collision)
    pub handler_overrides: Map<String, Value>,
    /// Optional event sender for observers (crossbeam, non-blocking)
    pub event_tx: Option<crossbeam_channel::Sender<PipelineEvent>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            app_kind: AppKind::new(DEFAULT_APP_KIND),
            verbosity: 0,
            quiet: false,
            handler_overrides: Map::new(),
            event_tx: None,
        }
    }
}

/// Outcome of handling one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every phase ran and the response was handed to the transport.
    Delivered,
    /// The gate closed: the request belongs to another pipeline. Not an
    /// error; the transport was not called.
    OutOfScope,
}

/// Staged request pipeline:
/// normalize → init → request → type → session → asr → nlu → inputs →
/// tts_before → tts → output → response → deliver.
pub struct Pipeline {
    config: PipelineConfig,
    gate: PhaseGate,
    registry: Arc<HandlerRegistry>,
    events: EventSink,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, registry: Arc<HandlerRegistry>) -> Self {
        let gate = PhaseGate::new(config.app_kind.clone());
        let events = EventSink::new(config.event_tx.clone());
        Self {
            config,
            gate,
            registry,
            events,
        }
    }

    /// Kind this pipeline handles.
    pub fn app_kind(&self) -> &AppKind {
        self.gate.expected()
    }

    /// Merges this pipeline's handler overrides into the owning
    /// application's handler configuration.
    ///
    /// Called once when the pipeline is installed into a host application,
    /// never per request. Deep merge; the pipeline's value wins on key
    /// collision.
    pub fn install_into(&self, app_handlers: &mut Map<String, Value>) {
        merge_handler_config(app_handlers, &self.config.handler_overrides);
    }

    /// Processes one inbound request.
    ///
    /// Runs the phase sequence over a fresh [`RequestContext`]. When the
    /// gate closes the remaining phases are skipped and the transport is
    /// never called. Handler errors propagate unchanged to the caller; no
    /// response is produced on error.
    pub async fn handle(
        &self,
        raw: RawRequest,
        transport: &dyn ResponseTransport,
    ) -> Result<Outcome> {
        let mut ctx = RequestContext::new(raw);

        // Request normalization runs before any phase, unconditionally:
        // decode the audio payload so every handler sees samples.
        if let Some(samples) = ctx.normalize_audio() {
            self.events.emit(PipelineEvent::AudioDecoded { samples });
            self.trace(2, &format!("decoded {} audio samples", samples));
        }

        // init runs ungated; its handlers classify the request
        ctx.declare_kind(self.gate.expected().clone());
        self.run_phase(Phase::Init, &mut ctx).await?;

        // every later phase re-checks the gate; once it fails, nothing
        // else runs for this request
        for &phase in &Phase::SEQUENCE[1..] {
            if !self.gate.should_continue(&ctx) {
                self.events.emit(PipelineEvent::GateClosed { before: phase });
                self.trace(
                    1,
                    &format!("request is not for '{}', skipping", self.gate.expected()),
                );
                return Ok(Outcome::OutOfScope);
            }
            self.run_phase(phase, &mut ctx).await?;
        }

        // terminal side effect: hand the response field to the transport
        transport.set_response(ctx.response.take()).await?;
        self.events.emit(PipelineEvent::ResponseDelivered);
        self.trace(1, "response delivered");

        Ok(Outcome::Delivered)
    }

    async fn run_phase(&self, phase: Phase, ctx: &mut RequestContext) -> Result<()> {
        self.events.emit(PipelineEvent::PhaseStarted { phase });
        self.trace(2, &format!("{{ {} }}", phase));

        self.registry.run(phase, ctx).await?;

        self.events.emit(PipelineEvent::PhaseCompleted {
            phase,
            handlers: self.registry.count(phase),
        });
        Ok(())
    }

    fn trace(&self, level: u8, msg: &str) {
        if !self.config.quiet && self.config.verbosity >= level {
            eprintln!("voxflow: {}", msg);
        }
    }
}
