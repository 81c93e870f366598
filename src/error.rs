//! LingoTalks Error Types
//!
//! One enum per failure domain, plus [`LingoError`] to carry any of them
//! across layers that don't care which domain failed.

use std::path::PathBuf;
use thiserror::Error;

/// Speech generation failures
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Nothing to speak: text is empty")]
    EmptyText,

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("No speech backend available for this language")]
    BackendUnavailable,

    #[error("{backend} synthesis failed: {message}")]
    Backend { backend: String, message: String },

    #[error("{backend} synthesis timed out after {secs}s")]
    Timeout { backend: String, secs: u64 },

    #[error("Generation was superseded by a newer request")]
    Superseded,

    #[error("Could not allocate audio file: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl SynthesisError {
    pub fn backend(backend: &str, message: impl std::fmt::Display) -> Self {
        SynthesisError::Backend {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

/// Audio device and transport failures
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No audio available. Generate it first.")]
    NothingToPlay,

    #[error("Failed to initialize audio device: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to load {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),
}

/// Translation service failures
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Translation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Translation service returned HTTP {0}")]
    Status(u16),

    #[error("Unexpected translation response: {0}")]
    Malformed(String),
}

/// Notes file failures
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("There is nothing to save.")]
    NothingToSave,

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Dictionary transport failures.
///
/// A word with no definition is not an error; lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Dictionary request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected dictionary response: {0}")]
    Malformed(String),
}

/// Central error type for LingoTalks
#[derive(Error, Debug)]
pub enum LingoError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for LingoTalks operations
pub type LingoResult<T> = Result<T, LingoError>;

/// Helpers to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for PlaybackError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        PlaybackError::Lock(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SynthesisError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        SynthesisError::Lock(err.to_string())
    }
}
