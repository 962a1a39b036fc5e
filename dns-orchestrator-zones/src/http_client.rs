//! HTTP request helpers for the Cloudflare client handle.
//!
//! Sends a prepared `RequestBuilder`, turns transport trouble into
//! [`TransportError`], and parses the body as an [`ApiEnvelope`]. Business failures
//! inside a parsed envelope are left alone; classifying them is the operations' job.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::cloudflare::ApiEnvelope;
use crate::config::{ConfigError, ZonesConfig};
use crate::error::TransportError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Retry-After values above this are capped.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Exponential backoff ceiling.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Build the shared reqwest client with the configured timeouts.
pub fn create_http_client(config: &ZonesConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send one request and return `(status, body)`.
    ///
    /// HTTP 429 becomes [`TransportError::RateLimited`] and 502-504 become
    /// [`TransportError::Status`] without reading further; every other status is
    /// returned with its body for envelope parsing.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<(u16, String), TransportError> {
        log::debug!("[cloudflare] {method} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[cloudflare] Response Status: {status}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[cloudflare] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(TransportError::RateLimited { retry_after, body });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[cloudflare] Server error (HTTP {status})");
            return Err(TransportError::Status {
                status,
                body: truncate_for_log(&body),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(format!("Failed to read response body: {e}"))
            } else {
                TransportError::Network(format!("Failed to read response body: {e}"))
            }
        })?;

        log::debug!("[cloudflare] Response Body: {}", truncate_for_log(&body));

        Ok((status, body))
    }

    /// Parse a response body as an envelope.
    ///
    /// A body that is not an envelope yields [`TransportError::Status`] for error
    /// statuses (so a bare 404 still reads as "not found") and
    /// [`TransportError::Decode`] otherwise.
    pub fn parse_envelope<T>(status: u16, body: &str) -> Result<ApiEnvelope<T>, TransportError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str::<ApiEnvelope<T>>(body)
            .map(|envelope| envelope.with_status(status))
            .map_err(|e| {
                if status >= 400 {
                    log::warn!("[cloudflare] HTTP {status} without an API envelope");
                    TransportError::Status {
                        status,
                        body: truncate_for_log(body),
                    }
                } else {
                    log::error!("[cloudflare] JSON parse failed: {e}");
                    log::error!("[cloudflare] Raw response: {}", truncate_for_log(body));
                    TransportError::Decode(e.to_string())
                }
            })
    }

    /// [`execute_request`](Self::execute_request) with retries for transient failures.
    ///
    /// # Retry strategy
    /// - Retries network errors, timeouts, HTTP 429 and 502-504
    /// - Waits for `Retry-After` (capped at 30s) when present, otherwise backs off
    ///   exponentially: 100ms, 200ms, 400ms, ... (capped at 10s)
    /// - `max_retries == 0` or an unclonable request disables retrying
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        method: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), TransportError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, method, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[cloudflare] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, method, url).await;
            };

            match Self::execute_request(req, method, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[cloudflare] {method} {url} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        max_retries + 1,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            TransportError::Network("All retries exhausted with no error captured".to_string())
        }))
    }
}

/// Transient failures worth another attempt.
fn is_retryable(error: &TransportError) -> bool {
    match error {
        TransportError::Network(_) | TransportError::Timeout(_) | TransportError::RateLimited { .. } => {
            true
        }
        TransportError::Status { status, .. } => matches!(status, 502..=504),
        TransportError::Decode(_) | TransportError::Cancelled => false,
    }
}

fn retry_delay(error: &TransportError, attempt: u32) -> Duration {
    if let TransportError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
