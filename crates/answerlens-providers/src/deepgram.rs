//! Deepgram pre-recorded transcription backend.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use answerlens_core::{Transcriber, TranscriptionError};

use crate::audio::AudioFormat;
use crate::http::{build_client, check_status, send_error, DEFAULT_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";
const DEFAULT_MODEL: &str = "nova-2";

/// Transcribes by posting raw audio to Deepgram's `/v1/listen`.
pub struct DeepgramTranscriber {
    api_key: String,
    base_url: String,
    model: String,
    language: String,
    client: reqwest::Client,
}

impl DeepgramTranscriber {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, TranscriptionError> {
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            language: "en-US".to_string(),
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// `{base}/v1/listen` with percent-encoded query parameters.
    fn listen_url(&self) -> Result<reqwest::Url, TranscriptionError> {
        let endpoint = format!("{}/v1/listen", self.base_url.trim_end_matches('/'));
        let mut url = reqwest::Url::parse(&endpoint).map_err(|e| {
            TranscriptionError::NetworkError(format!("invalid Deepgram URL {endpoint}: {e}"))
        })?;
        url.query_pairs_mut()
            .append_pair("model", &self.model)
            .append_pair("language", &self.language)
            .append_pair("smart_format", "true")
            .append_pair("punctuate", "true");
        Ok(url)
    }
}

#[derive(Deserialize)]
struct DeepgramResponse {
    results: DeepgramResults,
}

#[derive(Deserialize)]
struct DeepgramResults {
    #[serde(default)]
    channels: Vec<DeepgramChannel>,
}

#[derive(Deserialize)]
struct DeepgramChannel {
    #[serde(default)]
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Deserialize)]
struct DeepgramAlternative {
    #[serde(default)]
    transcript: String,
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    fn name(&self) -> &str {
        "deepgram"
    }

    #[instrument(skip(self, audio), fields(model = %self.model, bytes = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        let response = self
            .client
            .post(self.listen_url()?)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("content-type", AudioFormat::sniff(audio).mime_type())
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| send_error(e, DEFAULT_TIMEOUT_SECS))?;
        let response = check_status(response).await?;

        let body: DeepgramResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let transcript = body
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|a| a.transcript.trim().to_string())
            .unwrap_or_default();

        tracing::info!(chars = transcript.len(), "transcription completed");
        Ok(transcript)
    }
}
