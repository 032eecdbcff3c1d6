//! Audio payload handling: base64 sample codec and WAV ingestion.

pub mod samples;
pub mod wav;

pub use samples::{decode_samples, encode_samples};
pub use wav::samples_from_wav;
