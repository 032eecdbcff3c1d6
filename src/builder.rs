//! Request and response builders.
//!
//! Assemble raw requests and response payloads without hand-writing JSON.
//! Used by test suites and by hosts that synthesize requests (e.g. turning
//! a WAV upload into an audio request).

use crate::audio::{encode_samples, samples_from_wav};
use crate::context::{AudioData, AudioPayload, RawRequest};
use crate::error::Result;
use serde_json::{Map, Value, json};
use std::io::Read;

/// Builds raw inbound requests.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    request: RawRequest,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request's text field (typed or pre-transcribed input).
    pub fn text(mut self, text: &str) -> Self {
        self.request
            .payload
            .insert("text".to_string(), json!(text));
        self
    }

    /// Sets the request locale.
    pub fn locale(mut self, locale: &str) -> Self {
        self.request
            .payload
            .insert("locale".to_string(), json!(locale));
        self
    }

    /// Sets an arbitrary payload field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.request.payload.insert(key.to_string(), value);
        self
    }

    /// Attaches an already-encoded base64 audio payload.
    pub fn audio_base64(mut self, data: impl Into<String>) -> Self {
        self.request.audio = Some(AudioPayload {
            data: AudioData::Encoded(data.into()),
        });
        self
    }

    /// Attaches audio from raw samples, encoded to the wire form so the
    /// request looks exactly like one a transport would deliver.
    pub fn audio_samples(self, samples: &[f32]) -> Self {
        let encoded = encode_samples(samples);
        self.audio_base64(encoded)
    }

    /// Attaches audio read from a WAV stream.
    pub fn audio_wav(self, reader: impl Read) -> Result<Self> {
        let samples = samples_from_wav(reader)?;
        Ok(self.audio_samples(&samples))
    }

    pub fn build(self) -> RawRequest {
        self.request
    }
}

/// Builds response payloads in the shape the response phase produces.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    payload: Map<String, Value>,
    actions: Vec<Value>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spoken reply.
    pub fn speech(mut self, text: &str) -> Self {
        self.payload.insert("speech".to_string(), json!(text));
        self
    }

    /// Sets the reprompt spoken when the user stays silent.
    pub fn reprompt(mut self, text: &str) -> Self {
        self.payload.insert("reprompt".to_string(), json!(text));
        self
    }

    /// Appends a `{key, value}` output action.
    pub fn action(mut self, key: &str, value: Value) -> Self {
        self.actions.push(json!({"key": key, "value": value}));
        self
    }

    /// Marks whether the session ends with this response.
    pub fn end_session(mut self, end: bool) -> Self {
        self.payload.insert("end_session".to_string(), json!(end));
        self
    }

    pub fn build(mut self) -> Value {
        if !self.actions.is_empty() {
            self.payload
                .insert("actions".to_string(), Value::Array(self.actions));
        }
        Value::Object(self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode_samples;
    use std::io::Cursor;

    #[test]
    fn builds_text_request() {
        let request = RequestBuilder::new()
            .text("what time is it")
            .locale("en-US")
            .build();

        assert_eq!(request.payload["text"], json!("what time is it"));
        assert_eq!(request.payload["locale"], json!("en-US"));
        assert!(!request.has_audio());
    }

    #[test]
    fn builds_audio_request_in_wire_form() {
        let request = RequestBuilder::new().audio_samples(&[1.0, -0.5]).build();

        let Some(AudioPayload {
            data: AudioData::Encoded(encoded),
        }) = &request.audio
        else {
            panic!("expected encoded audio payload");
        };
        assert_eq!(decode_samples(encoded), vec![1.0, -0.5]);
    }

    #[test]
    fn builds_audio_request_from_wav() {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for s in [0.25f32, -0.25] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let request = RequestBuilder::new()
            .audio_wav(Cursor::new(cursor.into_inner()))
            .unwrap()
            .build();

        let Some(AudioPayload {
            data: AudioData::Encoded(encoded),
        }) = &request.audio
        else {
            panic!("expected encoded audio payload");
        };
        assert_eq!(decode_samples(encoded), vec![0.25, -0.25]);
    }

    #[test]
    fn custom_fields_are_preserved() {
        let request = RequestBuilder::new()
            .field("session", json!({"id": "abc"}))
            .build();

        assert_eq!(request.payload["session"]["id"], json!("abc"));
    }

    #[test]
    fn builds_response_with_actions() {
        let response = ResponseBuilder::new()
            .speech("hello there")
            .reprompt("still there?")
            .action("show_card", json!({"title": "Hi"}))
            .action("log", json!("greeted"))
            .end_session(false)
            .build();

        assert_eq!(response["speech"], json!("hello there"));
        assert_eq!(response["reprompt"], json!("still there?"));
        assert_eq!(response["end_session"], json!(false));
        assert_eq!(response["actions"].as_array().unwrap().len(), 2);
        assert_eq!(response["actions"][0]["key"], json!("show_card"));
    }

    #[test]
    fn response_without_actions_omits_the_field() {
        let response = ResponseBuilder::new().speech("bye").build();
        assert!(response.get("actions").is_none());
    }
}
