use std::time::Duration;

use thiserror::Error;

/// Raised before any backend is tried. The only error that leaves
/// the extraction orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported image type '{0}', expected JPEG, PNG, GIF or BMP")]
    UnsupportedType(String),
    #[error("image is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("image '{0}' is empty")]
    Empty(String),
}

/// Failure of a single recognition backend. Always recovered by moving on
/// to the next strategy.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("engine initialization failed: {0}")]
    Initialization(String),
    #[error("engine error: {0}")]
    Engine(String),
    #[error("image could not be decoded: {0}")]
    InvalidImage(String),
    #[error("no credential configured for this backend")]
    MissingCredential,
    #[error("service responded with status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service reported an error: {0}")]
    Service(String),
    #[error("malformed response payload: {0}")]
    MalformedPayload(String),
    #[error("backend returned no text")]
    EmptyText,
    #[error("backend returned only {chars} usable characters")]
    InsufficientText { chars: usize },
    #[error("backend did not answer within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("problem description is empty")]
    EmptyProblem,
    #[error("no credential configured for {0}")]
    MissingCredential(&'static str),
    #[error("{provider} responded with status {status}: {body}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0} returned an empty completion")]
    EmptyCompletion(&'static str),
}
