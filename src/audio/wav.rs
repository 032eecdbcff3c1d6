//! WAV ingestion for building audio requests.
//!
//! Turns a WAV stream into the f32 sample sequence the pipeline carries.
//! Useful for fixtures and for hosts that accept WAV uploads instead of the
//! raw base64 payload.

use crate::error::{Result, VoxflowError};
use std::io::Read;

/// Reads a WAV stream into 32-bit float samples.
///
/// Supports 16-bit integer and 32-bit float WAV data. Integer samples are
/// normalized to [-1.0, 1.0]. Stereo input is downmixed to mono by
/// averaging channel pairs; more than two channels is rejected.
pub fn samples_from_wav(reader: impl Read) -> Result<Vec<f32>> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| VoxflowError::AudioPayload {
        message: format!("Failed to parse WAV file: {}", e),
    })?;

    let spec = wav_reader.spec();
    if spec.channels == 0 || spec.channels > 2 {
        return Err(VoxflowError::AudioPayload {
            message: format!("Unsupported channel count: {}", spec.channels),
        });
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => wav_reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VoxflowError::AudioPayload {
                message: format!("Failed to read WAV samples: {}", e),
            })?,
        hound::SampleFormat::Int => wav_reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VoxflowError::AudioPayload {
                message: format!("Failed to read WAV samples: {}", e),
            })?,
    };

    // Downmix stereo to mono
    if spec.channels == 2 {
        Ok(samples
            .chunks_exact(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect())
    } else {
        Ok(samples)
    }
}
