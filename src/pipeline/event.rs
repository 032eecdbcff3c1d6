//! Observer events emitted while a request flows through the pipeline.
//!
//! Events are sent non-blocking over an optional crossbeam channel; when no
//! observer is attached (or the channel is full) they are dropped. The
//! request path never waits on an observer.

use crate::defaults::EVENT_BUFFER;
use crate::pipeline::phase::Phase;
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Progress notifications for an observer (daemon, test harness, metrics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Audio payload was decoded during request normalization.
    AudioDecoded { samples: usize },
    /// A phase is about to run its handlers.
    PhaseStarted { phase: Phase },
    /// A phase finished; `handlers` is how many ran.
    PhaseCompleted { phase: Phase, handlers: usize },
    /// The gate closed; no further phase runs for this request.
    GateClosed { before: Phase },
    /// The response was handed to the transport.
    ResponseDelivered,
}

/// Creates a bounded observer channel with the default capacity.
pub fn event_channel() -> (Sender<PipelineEvent>, Receiver<PipelineEvent>) {
    crossbeam_channel::bounded(EVENT_BUFFER)
}

/// Non-blocking event emitter.
///
/// Wraps the optional sender so call sites stay one line.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<PipelineEvent>>,
}

impl EventSink {
    pub fn new(tx: Option<Sender<PipelineEvent>>) -> Self {
        Self { tx }
    }

    /// Emits an event, dropping it when no observer is attached or the
    /// channel is full.
    pub fn emit(&self, event: PipelineEvent) {
        if let Some(ref tx) = self.tx {
            let _ = tx.try_send(event);
        }
    }
}
