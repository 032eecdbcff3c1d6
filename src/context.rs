//! Per-request data carrier passed through every pipeline phase.
//!
//! One `RequestContext` exists per inbound request. The orchestrator owns it
//! for the request's lifetime; handlers read and mutate it, and the final
//! response field is handed to the transport after the last phase.

use crate::audio::decode_samples;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Application kind tag.
///
/// Set once during classification and compared by the gate against the
/// pipeline's configured kind. A plain tag, never a runtime type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppKind(String);

impl AppKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Audio data carried by a request: wire form or decoded samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioData {
    /// Base64-encoded little-endian f32 PCM, as received from the transport.
    Encoded(String),
    /// Decoded sample sequence, after request normalization.
    Samples(Vec<f32>),
}

/// Audio sub-object of a raw request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioPayload {
    pub data: AudioData,
}

/// Raw inbound request payload.
///
/// Only the `audio` sub-field has meaning to the pipeline itself; everything
/// else is opaque and preserved for handlers to interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPayload>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl RawRequest {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// A single `{key, value}` pair appended to the request's output actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputAction {
    pub key: String,
    pub value: Value,
}

/// Mutable per-request state.
///
/// Exactly one instance per inbound request; never shared across requests.
/// Classification and output actions are guarded by methods so their
/// invariants (classify-once, append-only) hold for any handler mix.
#[derive(Debug)]
pub struct RequestContext {
    raw_request: RawRequest,
    declared_kind: Option<AppKind>,
    app_kind: Option<AppKind>,
    /// Session data, mutated by the session phase.
    pub session: HashMap<String, Value>,
    /// Parsed user inputs, populated by the nlu/inputs phases.
    pub inputs: HashMap<String, Value>,
    /// Synthesized speech, populated by the tts phases.
    pub speech_samples: Vec<f32>,
    /// Final response payload, set by the response phase.
    pub response: Option<Value>,
    actions: Vec<OutputAction>,
}

impl RequestContext {
    pub fn new(raw_request: RawRequest) -> Self {
        Self {
            raw_request,
            declared_kind: None,
            app_kind: None,
            session: HashMap::new(),
            inputs: HashMap::new(),
            speech_samples: Vec::new(),
            response: None,
            actions: Vec::new(),
        }
    }

    pub fn raw_request(&self) -> &RawRequest {
        &self.raw_request
    }

    pub fn raw_request_mut(&mut self) -> &mut RawRequest {
        &mut self.raw_request
    }

    /// Decodes the raw request's audio payload in place.
    ///
    /// Returns the decoded sample count, or `None` when the request carries
    /// no encoded audio. Idempotent: already-decoded payloads are left
    /// untouched.
    pub(crate) fn normalize_audio(&mut self) -> Option<usize> {
        let audio = self.raw_request.audio.as_mut()?;
        if let AudioData::Encoded(encoded) = &audio.data {
            let samples = decode_samples(encoded);
            let count = samples.len();
            audio.data = AudioData::Samples(samples);
            Some(count)
        } else {
            None
        }
    }

    /// Decoded audio samples of the raw request, if normalization ran.
    pub fn audio_samples(&self) -> Option<&[f32]> {
        match &self.raw_request.audio {
            Some(AudioPayload {
                data: AudioData::Samples(samples),
            }) => Some(samples),
            _ => None,
        }
    }

    /// Kind the processing pipeline declared for this request.
    pub fn declared_kind(&self) -> Option<&AppKind> {
        self.declared_kind.as_ref()
    }

    pub(crate) fn declare_kind(&mut self, kind: AppKind) {
        self.declared_kind = Some(kind);
    }

    /// Classified kind of this request, if classification ran.
    pub fn app_kind(&self) -> Option<&AppKind> {
        self.app_kind.as_ref()
    }

    /// Records the classification result.
    ///
    /// The kind is set at most once per request: the first call wins and
    /// returns true, later calls are ignored and return false.
    pub fn classify(&mut self, kind: AppKind) -> bool {
        if self.app_kind.is_none() {
            self.app_kind = Some(kind);
            true
        } else {
            false
        }
    }

    /// Appends an output action. Actions only grow during a request.
    pub fn push_action(&mut self, key: impl Into<String>, value: Value) {
        self.actions.push(OutputAction {
            key: key.into(),
            value,
        });
    }

    /// Output actions accumulated so far, in append order.
    pub fn actions(&self) -> &[OutputAction] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::encode_samples;
    use serde_json::json;

    #[test]
    fn classify_first_wins() {
        let mut ctx = RequestContext::new(RawRequest::default());

        assert!(ctx.classify(AppKind::new("voice-app")));
        assert!(!ctx.classify(AppKind::new("other-app")));
        assert_eq!(ctx.app_kind(), Some(&AppKind::new("voice-app")));
    }

    #[test]
    fn actions_accumulate_in_order() {
        let mut ctx = RequestContext::new(RawRequest::default());

        ctx.push_action("speech", json!("hello"));
        ctx.push_action("card", json!({"title": "Hi"}));
        ctx.push_action("speech", json!("bye"));

        let keys: Vec<&str> = ctx.actions().iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["speech", "card", "speech"]);
    }

    #[test]
    fn normalize_audio_decodes_encoded_payload() {
        let encoded = encode_samples(&[1.0, -1.0]);
        let raw = RawRequest {
            audio: Some(AudioPayload {
                data: AudioData::Encoded(encoded),
            }),
            ..Default::default()
        };
        let mut ctx = RequestContext::new(raw);

        assert_eq!(ctx.normalize_audio(), Some(2));
        assert_eq!(ctx.audio_samples(), Some([1.0f32, -1.0].as_slice()));
    }

    #[test]
    fn normalize_audio_is_idempotent() {
        let raw = RawRequest {
            audio: Some(AudioPayload {
                data: AudioData::Encoded(encode_samples(&[0.5])),
            }),
            ..Default::default()
        };
        let mut ctx = RequestContext::new(raw);

        assert_eq!(ctx.normalize_audio(), Some(1));
        assert_eq!(ctx.normalize_audio(), None);
        assert_eq!(ctx.audio_samples(), Some([0.5f32].as_slice()));
    }

    #[test]
    fn normalize_audio_without_payload_is_noop() {
        let mut ctx = RequestContext::new(RawRequest::default());

        assert_eq!(ctx.normalize_audio(), None);
        assert_eq!(ctx.audio_samples(), None);
    }

    #[test]
    fn raw_request_round_trips_through_json() {
        let raw: RawRequest = serde_json::from_value(json!({
            "audio": { "data": "AACAPw==" },
            "text": "turn on the lights",
            "locale": "en-US",
        }))
        .unwrap();

        assert!(raw.has_audio());
        assert_eq!(raw.payload["text"], json!("turn on the lights"));

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value["audio"]["data"], json!("AACAPw=="));
        assert_eq!(value["locale"], json!("en-US"));
    }

    #[test]
    fn decoded_audio_serializes_as_samples() {
        let raw = RawRequest {
            audio: Some(AudioPayload {
                data: AudioData::Samples(vec![1.0, 0.0]),
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value["audio"]["data"], json!([1.0, 0.0]));
    }

    #[test]
    fn app_kind_display_and_from() {
        let kind: AppKind = "voice-app".into();
        assert_eq!(kind.to_string(), "voice-app");
        assert_eq!(kind.as_str(), "voice-app");
    }
}
