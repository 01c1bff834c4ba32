//! Error types for the engine and its transcription collaborator.
//!
//! The engine itself performs no I/O, so `EngineError` is deliberately
//! narrow. `TranscriptionError` lives here as well so callers can classify
//! transcription failures without depending on `answerlens-providers`.

use thiserror::Error;

/// Errors raised by the scoring and feedback engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The question context is missing a required field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An internal invariant was violated while assembling a report.
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// The engine configuration was rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur when turning recorded audio into a transcript.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// No audio bytes were supplied.
    #[error("no audio provided")]
    EmptyAudio,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The API answered with a body we could not interpret.
    #[error("invalid transcription response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl TranscriptionError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            TranscriptionError::EmptyAudio | TranscriptionError::AuthenticationFailed(_)
        )
    }

    /// A message suitable for showing to the person who recorded the answer.
    pub fn user_message(&self) -> String {
        match self {
            TranscriptionError::EmptyAudio => {
                "No audio was recorded. Please record your answer and try again.".to_string()
            }
            TranscriptionError::AuthenticationFailed(_) => {
                "The transcription service rejected our credentials.".to_string()
            }
            TranscriptionError::Timeout(_) | TranscriptionError::NetworkError(_) => {
                "The transcription service could not be reached. Please try again.".to_string()
            }
            TranscriptionError::ApiError { .. } | TranscriptionError::InvalidResponse(_) => {
                "Transcription failed. Please try recording again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_errors() {
        assert!(TranscriptionError::EmptyAudio.is_permanent());
        assert!(TranscriptionError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(!TranscriptionError::Timeout(30).is_permanent());
        assert!(!TranscriptionError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_permanent());
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::InvalidInput("question id is empty".into());
        assert_eq!(err.to_string(), "invalid input: question id is empty");
    }
}
