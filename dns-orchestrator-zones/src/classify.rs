//! Remote failure classification.
//!
//! Every remote call made by the resolver and the operations goes through
//! [`client`] and [`guarded`] (transport failures, cancellation) and then
//! [`envelope`] (business failures). Nothing else produces remote-side
//! [`ZoneError`]s.

use std::future::Future;
use std::sync::Arc;

use crate::cancel::CancelSignal;
use crate::cloudflare::{ApiEnvelope, ApiMessage};
use crate::error::{RejectReason, Result, TransportError, UnavailableReason, ZoneError};
use crate::traits::{ClientProvider, ZoneApi};
use crate::utils::log_sanitizer::truncate_for_log;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Cloudflare 错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    fn from_errors(errors: Option<Vec<ApiMessage>>) -> Self {
        errors
            .and_then(|errors| errors.into_iter().next())
            .map_or_else(
                || Self {
                    code: None,
                    message: "Unknown error".to_string(),
                },
                |e| Self {
                    code: e.code.map(|c| c.to_string()),
                    message: e.message,
                },
            )
    }
}

/// Obtain a client handle from `provider`, honouring `cancel`.
pub(crate) async fn client(
    provider: &dyn ClientProvider,
    domain: &str,
    cancel: &CancelSignal,
) -> Result<Arc<dyn ZoneApi>> {
    guarded(domain, cancel, provider.get_client(cancel)).await
}

/// Run one remote call, racing it against `cancel`.
///
/// An already-fired signal returns before `call` is ever polled, so no request is
/// sent. Transport failures are classified against `domain`.
pub(crate) async fn guarded<T, F>(domain: &str, cancel: &CancelSignal, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, TransportError>>,
{
    if cancel.is_cancelled() {
        return Err(ZoneError::cancelled(domain));
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            log::warn!("[cloudflare] Request for {domain} cancelled");
            Err(ZoneError::cancelled(domain))
        }
        result = call => result.map_err(|e| transport_error(domain, e)),
    }
}

/// Unwrap an envelope: `Ok(result)` on success (the result itself may be absent),
/// a classified error otherwise.
///
/// When the error code is absent or unknown, the HTTP status the envelope arrived
/// with decides the classification instead.
pub(crate) fn envelope<T>(domain: &str, envelope: ApiEnvelope<T>) -> Result<Option<T>> {
    if envelope.success {
        return Ok(envelope.result);
    }
    let raw = RawApiError::from_errors(envelope.errors);
    log::debug!(
        "[cloudflare] API error for {domain}: status={:?} code={:?} message={}",
        envelope.http_status,
        raw.code,
        raw.message
    );
    match (map_api_error(domain, raw), envelope.http_status) {
        (
            ZoneError::RemoteRejected {
                reason: RejectReason::Other,
                raw_code,
                raw_message,
                ..
            },
            Some(status),
        ) if status >= 400 => Err(status_error(
            domain,
            status,
            raw_code,
            format!("HTTP {status}: {raw_message}"),
        )),
        (err, _) => Err(err),
    }
}

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/reference/errors/>
pub(crate) fn map_api_error(domain: &str, raw: RawApiError) -> ZoneError {
    let reason = match raw.code.as_deref() {
        // Zone does not exist
        // 1001: Invalid zone identifier
        // 7000: No route for that URI
        // 7003: Could not route to /zones/..., perhaps your object identifier is invalid?
        Some("1001" | "7000" | "7003") => {
            return ZoneError::NotFound {
                domain: domain.to_string(),
                raw_message: Some(raw.message),
            };
        }

        // Authentication error
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9106: Missing X-Auth-Key, X-Auth-Email or Authorization headers
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        Some("6003" | "6103" | "6111" | "9106" | "9109" | "10000") => {
            RejectReason::Authentication
        }

        // 9103: Unknown X-Auth-Key or X-Auth-Email
        // 10001: The token lacks the required permission
        Some("9103" | "10001") => RejectReason::PermissionDenied,

        // 1061: <domain> already exists
        Some("1061") => RejectReason::Conflict,

        // 1049: <domain> is not a registered domain
        // 1097: This zone cannot be created (banned/reserved)
        // 1099: We were unable to identify <domain> as a registered domain
        // 1100: Zone name is a subdomain / invalid
        // 1117: Invalid account or account not found
        Some("1049" | "1097" | "1099" | "1100" | "1117") => RejectReason::InvalidRequest,

        // 1105: You cannot add any more zones to this account
        Some("1105") => RejectReason::QuotaExceeded,

        _ => RejectReason::Other,
    };

    ZoneError::RemoteRejected {
        domain: domain.to_string(),
        reason,
        raw_code: raw.code,
        raw_message: raw.message,
    }
}

/// Classify a transport failure (no envelope available).
pub(crate) fn transport_error(domain: &str, error: TransportError) -> ZoneError {
    let unavailable = |reason, detail: String, retry_after| ZoneError::RemoteUnavailable {
        domain: domain.to_string(),
        reason,
        detail,
        retry_after,
    };

    match error {
        TransportError::Network(detail) => unavailable(UnavailableReason::Network, detail, None),
        TransportError::Timeout(detail) => unavailable(UnavailableReason::Timeout, detail, None),
        TransportError::RateLimited { retry_after, body } => unavailable(
            UnavailableReason::RateLimited,
            format!("HTTP 429: {}", truncate_for_log(&body)),
            retry_after,
        ),
        TransportError::Cancelled => ZoneError::cancelled(domain),
        TransportError::Decode(detail) => {
            ZoneError::malformed(domain, format!("unexpected response body: {detail}"))
        }
        TransportError::Status { status, body } => status_error(
            domain,
            status,
            None,
            format!("HTTP {status}: {}", truncate_for_log(&body)),
        ),
    }
}

/// HTTP status mapping, for failures the error code alone cannot classify.
fn status_error(
    domain: &str,
    status: u16,
    raw_code: Option<String>,
    message: String,
) -> ZoneError {
    let reason = match status {
        404 => {
            return ZoneError::NotFound {
                domain: domain.to_string(),
                raw_message: Some(message),
            };
        }
        500..=599 => {
            return ZoneError::RemoteUnavailable {
                domain: domain.to_string(),
                reason: UnavailableReason::ServerError,
                detail: message,
                retry_after: None,
            };
        }
        401 => RejectReason::Authentication,
        403 => RejectReason::PermissionDenied,
        409 => RejectReason::Conflict,
        400 | 422 => RejectReason::InvalidRequest,
        _ => RejectReason::Other,
    };

    ZoneError::RemoteRejected {
        domain: domain.to_string(),
        reason,
        raw_code,
        raw_message: message,
    }
}
