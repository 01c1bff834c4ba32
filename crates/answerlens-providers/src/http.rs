//! Response handling shared by the hosted transcription backends.

use answerlens_core::TranscriptionError;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, TranscriptionError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TranscriptionError::NetworkError(format!("failed to build HTTP client: {e}")))
}

/// Classify a failed `send()`.
pub(crate) fn send_error(e: reqwest::Error, timeout_secs: u64) -> TranscriptionError {
    if e.is_timeout() {
        TranscriptionError::Timeout(timeout_secs)
    } else {
        TranscriptionError::NetworkError(e.to_string())
    }
}

/// Map error statuses; successful responses pass through.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, TranscriptionError> {
    let status = response.status().as_u16();
    if status == 401 {
        let body = response.text().await.unwrap_or_default();
        return Err(TranscriptionError::AuthenticationFailed(body));
    }
    if status >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(TranscriptionError::ApiError {
            status,
            message: body,
        });
    }
    Ok(response)
}
