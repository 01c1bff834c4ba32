//! OpenAI audio transcription backend.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::instrument;

use answerlens_core::{Transcriber, TranscriptionError};

use crate::audio::AudioFormat;
use crate::http::{build_client, check_status, send_error, DEFAULT_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "whisper-1";

/// Transcribes through OpenAI's `/v1/audio/transcriptions` endpoint.
pub struct OpenAiTranscriber {
    api_key: String,
    base_url: String,
    model: String,
    language: Option<String>,
    client: reqwest::Client,
}

impl OpenAiTranscriber {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, TranscriptionError> {
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            language: None,
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Hint the spoken language (ISO-639-1, e.g. "en").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Deserialize)]
struct OpenAiTranscription {
    text: String,
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, audio), fields(model = %self.model, bytes = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        let format = AudioFormat::sniff(audio);
        let file = Part::bytes(audio.to_vec())
            .file_name(format.file_name())
            .mime_str(format.mime_type())
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| send_error(e, DEFAULT_TIMEOUT_SECS))?;
        let response = check_status(response).await?;

        let body: OpenAiTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let transcript = body.text.trim().to_string();
        tracing::info!(chars = transcript.len(), "transcription completed");
        Ok(transcript)
    }
}
