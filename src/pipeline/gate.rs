//! Scope gate evaluated before each gated phase.

use crate::context::{AppKind, RequestContext};

/// Guard that decides whether the remaining phases run for a request.
///
/// The gate passes only when the context's classified kind equals the
/// expected kind. A request that was never classified fails the gate the
/// same way a mismatched one does: it is simply not for this pipeline.
#[derive(Debug, Clone)]
pub struct PhaseGate {
    expected: AppKind,
}

impl PhaseGate {
    pub fn new(expected: AppKind) -> Self {
        Self { expected }
    }

    /// Kind this gate admits.
    pub fn expected(&self) -> &AppKind {
        &self.expected
    }

    /// True when the request belongs to this pipeline.
    pub fn should_continue(&self, ctx: &RequestContext) -> bool {
        ctx.app_kind() == Some(&self.expected)
    }
}
