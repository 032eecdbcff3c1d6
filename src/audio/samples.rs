//! Base64 audio payload codec.
//!
//! Inbound requests may carry speech as a base64 string wrapping raw
//! little-endian IEEE-754 32-bit float PCM (no header). This module decodes
//! that wire form into sample sequences, and encodes the inverse for
//! request builders.

use crate::defaults::BYTES_PER_SAMPLE;
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};

/// Standard alphabet, padding optional on decode.
///
/// Senders are inconsistent about padding trailing `=`, so accept both.
const AUDIO_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes a base64 audio payload into 32-bit float samples.
///
/// Each group of four consecutive bytes is reinterpreted as one
/// little-endian f32. Trailing bytes that do not fill a whole sample are
/// dropped. An empty or undecodable string yields an empty sequence;
/// this function never fails.
pub fn decode_samples(base64_audio: &str) -> Vec<f32> {
    let Ok(bytes) = AUDIO_BASE64.decode(base64_audio) else {
        return Vec::new();
    };

    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|group| f32::from_le_bytes([group[0], group[1], group[2], group[3]]))
        .collect()
}

/// Encodes 32-bit float samples into the base64 wire form.
///
/// Exact inverse of [`decode_samples`] for whole-sample input.
pub fn encode_samples(samples: &[f32]) -> String {
    let mut bytes = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    AUDIO_BASE64.encode(bytes)
}
