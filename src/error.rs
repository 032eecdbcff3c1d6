//! Error types for voxflow.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxflowError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio payload errors
    #[error("Audio payload error: {message}")]
    AudioPayload { message: String },

    // Handler errors, raised by registered phase handlers.
    // The orchestrator never constructs or wraps these — they propagate
    // unchanged out of the phase run to the transport.
    #[error("Handler '{handler}' failed during {phase}: {message}")]
    Handler {
        phase: String,
        handler: String,
        message: String,
    },

    // Response delivery errors
    #[error("Response delivery failed: {message}")]
    Transport { message: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VoxflowError>;
