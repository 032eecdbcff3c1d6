//! Default configuration constants for voxflow.
//!
//! Shared constants used across configuration types and the audio codec,
//! kept in one place to ensure consistency.

/// Bytes per audio sample in the wire encoding.
///
/// Inbound audio payloads are raw little-endian IEEE-754 32-bit float PCM
/// with no header, so every sample occupies exactly four bytes.
pub const BYTES_PER_SAMPLE: usize = 4;

/// Default application kind handled by a pipeline.
///
/// The gate compares each request's classified kind against this tag unless
/// the pipeline is configured with a different one.
pub const DEFAULT_APP_KIND: &str = "voice-app";

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and is what WAV fixtures
/// are normalized against when reading audio into a request.
pub const SAMPLE_RATE: u32 = 16000;

/// Default capacity for the pipeline event channel.
///
/// Events are emitted with `try_send` and dropped when the channel is full,
/// so the capacity only bounds how far an observer may lag.
pub const EVENT_BUFFER: usize = 256;
