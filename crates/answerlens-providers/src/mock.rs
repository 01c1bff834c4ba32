//! Mock transcriber for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use answerlens_core::{Transcriber, TranscriptionError};

/// A transcriber that returns a canned transcript without any network calls.
pub struct MockTranscriber {
    transcript: String,
    /// Error to return instead of the transcript, consumed by the next call.
    failure: Mutex<Option<TranscriptionError>>,
    call_count: AtomicU32,
}

impl MockTranscriber {
    /// Create a mock that always returns `transcript`.
    pub fn with_transcript(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            failure: Mutex::new(None),
            call_count: AtomicU32::new(0),
        }
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(mut self, error: TranscriptionError) -> Self {
        if let Ok(slot) = self.failure.get_mut() {
            *slot = Some(error);
        }
        self
    }

    /// Get the number of calls made to this transcriber.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        let failure = self.failure.lock().ok().and_then(|mut slot| slot.take());
        match failure {
            Some(error) => Err(error),
            None => Ok(self.transcript.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_transcript() {
        let mock = MockTranscriber::with_transcript("A heap is a tree.");
        assert_eq!(mock.transcribe(b"audio").await.unwrap(), "A heap is a tree.");
        assert_eq!(mock.transcribe(b"audio").await.unwrap(), "A heap is a tree.");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn fails_once_then_recovers() {
        let mock = MockTranscriber::with_transcript("ok").fail_next(TranscriptionError::Timeout(5));
        assert!(matches!(
            mock.transcribe(b"audio").await.unwrap_err(),
            TranscriptionError::Timeout(5)
        ));
        assert_eq!(mock.transcribe(b"audio").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn empty_audio_rejected() {
        let mock = MockTranscriber::with_transcript("ignored");
        assert!(mock.transcribe(&[]).await.unwrap_err().is_permanent());
    }
}
