//! Phase handler trait and registry.
//!
//! Handlers are the pipeline's only extension point: third parties attach
//! behavior to a named phase, and the orchestrator runs the handlers
//! registered for each phase in registration order, awaiting each one.

use crate::context::RequestContext;
use crate::error::Result;
use crate::pipeline::phase::Phase;
use std::collections::HashMap;
use std::sync::Arc;

/// Behavior attached to a pipeline phase.
///
/// Handlers receive the per-request context and may read or write any of
/// its fields. A handler may suspend while awaiting external work; the
/// orchestrator waits for it before starting the next handler.
#[async_trait::async_trait]
pub trait PhaseHandler: Send + Sync {
    async fn handle(&self, ctx: &mut RequestContext) -> Result<()>;

    /// Name for logging and error reporting.
    fn name(&self) -> &'static str {
        "handler"
    }
}

/// Adapter that turns a synchronous closure into a [`PhaseHandler`].
///
/// Most classification, session and output-shaping handlers have no reason
/// to suspend; this keeps their registration to one line.
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&mut RequestContext) -> Result<()> + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

#[async_trait::async_trait]
impl<F> PhaseHandler for FnHandler<F>
where
    F: Fn(&mut RequestContext) -> Result<()> + Send + Sync,
{
    async fn handle(&self, ctx: &mut RequestContext) -> Result<()> {
        (self.f)(ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Ordered handler lists per phase.
///
/// Built during installation, then frozen behind an `Arc` and shared by
/// every in-flight request. Installing a handler while requests are in
/// flight means building a new registry and swapping the `Arc`
/// (copy-on-write), so readers never need a lock.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Phase, Vec<Arc<dyn PhaseHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to a phase. Registration order is execution order.
    pub fn register(&mut self, phase: Phase, handler: Arc<dyn PhaseHandler>) -> &mut Self {
        self.handlers.entry(phase).or_default().push(handler);
        self
    }

    /// Registers a synchronous closure under a phase.
    pub fn register_fn<F>(&mut self, phase: Phase, name: &'static str, f: F) -> &mut Self
    where
        F: Fn(&mut RequestContext) -> Result<()> + Send + Sync + 'static,
    {
        self.register(phase, Arc::new(FnHandler::new(name, f)))
    }

    /// Handlers registered for a phase, in registration order.
    pub fn handlers_for(&self, phase: Phase) -> &[Arc<dyn PhaseHandler>] {
        self.handlers.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of handlers registered for a phase.
    pub fn count(&self, phase: Phase) -> usize {
        self.handlers_for(phase).len()
    }

    /// Runs every handler registered for a phase, in order, awaiting each.
    ///
    /// A handler error propagates unchanged and stops the remaining
    /// handlers of the phase.
    pub async fn run(&self, phase: Phase, ctx: &mut RequestContext) -> Result<()> {
        for handler in self.handlers_for(phase) {
            handler.handle(ctx).await?;
        }
        Ok(())
    }
}
