//! Named processing phases and their fixed ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named phase of the request pipeline.
///
/// Handlers register against a phase; the orchestrator runs the phases in
/// the fixed order of [`Phase::SEQUENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Classification and context setup. Runs unconditionally.
    Init,
    /// Request-level preparation.
    Request,
    /// Request type classification (launch, intent, end, ...).
    Type,
    /// Session data handling.
    Session,
    /// Speech recognition.
    Asr,
    /// Language understanding.
    Nlu,
    /// Input extraction from understanding results.
    Inputs,
    /// Pre-synthesis hooks.
    TtsBefore,
    /// Speech synthesis.
    Tts,
    /// Output shaping.
    Output,
    /// Response assembly; delivery follows this phase.
    Response,
}

impl Phase {
    /// All phases, in execution order.
    ///
    /// `Init` runs unconditionally; every later phase is gated.
    pub const SEQUENCE: [Phase; 11] = [
        Phase::Init,
        Phase::Request,
        Phase::Type,
        Phase::Session,
        Phase::Asr,
        Phase::Nlu,
        Phase::Inputs,
        Phase::TtsBefore,
        Phase::Tts,
        Phase::Output,
        Phase::Response,
    ];

    /// Phases that run only while the gate stays open.
    pub fn gated(self) -> bool {
        self != Phase::Init
    }

    /// Stable name used for logging and handler configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Request => "request",
            Phase::Type => "type",
            Phase::Session => "session",
            Phase::Asr => "asr",
            Phase::Nlu => "nlu",
            Phase::Inputs => "inputs",
            Phase::TtsBefore => "tts_before",
            Phase::Tts => "tts",
            Phase::Output => "output",
            Phase::Response => "response",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_with_init_and_ends_with_response() {
        assert_eq!(Phase::SEQUENCE.first(), Some(&Phase::Init));
        assert_eq!(Phase::SEQUENCE.last(), Some(&Phase::Response));
    }

    #[test]
    fn sequence_has_no_duplicates() {
        for (i, a) in Phase::SEQUENCE.iter().enumerate() {
            for b in &Phase::SEQUENCE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn only_init_is_ungated() {
        for phase in Phase::SEQUENCE {
            assert_eq!(phase.gated(), phase != Phase::Init);
        }
    }

    #[test]
    fn asr_runs_before_nlu_runs_before_tts() {
        let pos = |p: Phase| Phase::SEQUENCE.iter().position(|&q| q == p).unwrap();

        assert!(pos(Phase::Asr) < pos(Phase::Nlu));
        assert!(pos(Phase::Nlu) < pos(Phase::Inputs));
        assert!(pos(Phase::Inputs) < pos(Phase::TtsBefore));
        assert!(pos(Phase::TtsBefore) < pos(Phase::Tts));
        assert!(pos(Phase::Tts) < pos(Phase::Output));
        assert!(pos(Phase::Output) < pos(Phase::Response));
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Phase::Init.name(), "init");
        assert_eq!(Phase::TtsBefore.name(), "tts_before");
        assert_eq!(Phase::Response.to_string(), "response");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Phase::TtsBefore).unwrap();
        assert_eq!(json, "\"tts_before\"");
    }
}
