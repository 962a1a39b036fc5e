use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a [`ZoneError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneErrorKind {
    /// Rejected locally before any remote call.
    InvalidInput,
    /// The remote service has no zone matching the request.
    NotFound,
    /// The remote service answered and reported a failure.
    RemoteRejected,
    /// No usable answer was received.
    RemoteUnavailable,
    /// The remote service reported success without the data the operation needs.
    MalformedResponse,
}

/// Why the remote service rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Missing, malformed or revoked API token.
    Authentication,
    /// The token is valid but lacks the required scope.
    PermissionDenied,
    /// The zone already exists (or is pending) on the service.
    Conflict,
    /// The service refused the request body or parameters.
    InvalidRequest,
    /// The account cannot hold more zones.
    QuotaExceeded,
    /// Any error code not mapped above.
    Other,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Authentication => "authentication failed",
            Self::PermissionDenied => "permission denied",
            Self::Conflict => "conflict",
            Self::InvalidRequest => "invalid request",
            Self::QuotaExceeded => "quota exceeded",
            Self::Other => "rejected",
        };
        f.write_str(text)
    }
}

/// Why no usable answer was received from the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Connection refused, DNS failure, body read failure, etc.
    Network,
    /// The request timed out.
    Timeout,
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// The caller's [`CancelSignal`](crate::CancelSignal) fired.
    Cancelled,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate limited",
            Self::ServerError => "server error",
            Self::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Unified error type for all zone operations.
///
/// Every variant except [`InvalidInput`](Self::InvalidInput) carries the domain name
/// (or, for id-keyed calls, the zone id) that triggered it. Variants are serializable
/// with a `code` tag for structured error reporting.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ZoneError {
    /// A parameter failed local validation. No remote call was made.
    #[error("Invalid {param}: {detail}")]
    InvalidInput {
        /// Name of the offending parameter.
        param: String,
        /// What is wrong with it.
        detail: String,
    },

    /// No zone exists for the domain.
    #[error("Zone '{domain}' not found{}", message_suffix(.raw_message.as_deref()))]
    NotFound {
        /// Domain name (or zone id) that was looked up.
        domain: String,
        /// Original error message from the API, if any.
        raw_message: Option<String>,
    },

    /// The API answered with `success: false` (or an equivalent HTTP status).
    #[error("Request for '{domain}' rejected ({reason}{}): {raw_message}", code_suffix(.raw_code.as_deref()))]
    RemoteRejected {
        /// Domain name (or zone id) of the request.
        domain: String,
        /// Classified rejection cause.
        reason: RejectReason,
        /// Raw API error code, if one was returned.
        raw_code: Option<String>,
        /// Raw API error message.
        raw_message: String,
    },

    /// No usable answer: transport failure, throttling, server error or cancellation.
    #[error("Zone API unavailable for '{domain}' ({reason}): {detail}")]
    RemoteUnavailable {
        /// Domain name (or zone id) of the request.
        domain: String,
        /// Classified cause.
        reason: UnavailableReason,
        /// Underlying cause.
        detail: String,
        /// Suggested wait in seconds, when the API sent `Retry-After`.
        retry_after: Option<u64>,
    },

    /// The API reported success but the payload lacks a field the operation requires,
    /// or the body does not have the expected shape.
    #[error("Malformed response for '{domain}': {detail}")]
    MalformedResponse {
        /// Domain name (or zone id) of the request.
        domain: String,
        /// What was missing or unparsable.
        detail: String,
    },
}

fn message_suffix(raw_message: Option<&str>) -> String {
    raw_message.map_or_else(String::new, |msg| format!(": {msg}"))
}

fn code_suffix(raw_code: Option<&str>) -> String {
    raw_code.map_or_else(String::new, |code| format!(", code {code}"))
}

impl ZoneError {
    pub(crate) fn invalid_input(param: &str, detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            param: param.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn not_found(domain: &str) -> Self {
        Self::NotFound {
            domain: domain.to_string(),
            raw_message: None,
        }
    }

    pub(crate) fn malformed(domain: &str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            domain: domain.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn cancelled(domain: &str) -> Self {
        Self::RemoteUnavailable {
            domain: domain.to_string(),
            reason: UnavailableReason::Cancelled,
            detail: "operation cancelled by caller".to_string(),
            retry_after: None,
        }
    }

    /// The kind of this error.
    #[must_use]
    pub fn kind(&self) -> ZoneErrorKind {
        match self {
            Self::InvalidInput { .. } => ZoneErrorKind::InvalidInput,
            Self::NotFound { .. } => ZoneErrorKind::NotFound,
            Self::RemoteRejected { .. } => ZoneErrorKind::RemoteRejected,
            Self::RemoteUnavailable { .. } => ZoneErrorKind::RemoteUnavailable,
            Self::MalformedResponse { .. } => ZoneErrorKind::MalformedResponse,
        }
    }

    /// Domain name (or zone id) the error refers to. `None` for local validation errors.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { .. } => None,
            Self::NotFound { domain, .. }
            | Self::RemoteRejected { domain, .. }
            | Self::RemoteUnavailable { domain, .. }
            | Self::MalformedResponse { domain, .. } => Some(domain),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the service refused because the zone already exists.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RemoteRejected {
                reason: RejectReason::Conflict,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable {
                reason: UnavailableReason::Cancelled,
                ..
            }
        )
    }

    /// Transient failures a caller may retry. Cancellation is not one of them.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { reason, .. } if *reason != UnavailableReason::Cancelled
        )
    }

    /// 是否为预期行为（用户输入、资源不存在、冲突等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidInput { .. } | Self::NotFound { .. } => true,
            Self::RemoteRejected { reason, .. } => *reason != RejectReason::Other,
            Self::RemoteUnavailable { reason, .. } => *reason == UnavailableReason::Cancelled,
            Self::MalformedResponse { .. } => false,
        }
    }
}

/// Convenience type alias for `Result<T, ZoneError>`.
pub type Result<T> = std::result::Result<T, ZoneError>;

/// Failure reported by a [`ZoneApi`](crate::ZoneApi) client handle before any
/// envelope could be read. Classified into a [`ZoneError`] by the operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Rate limited (HTTP 429)")]
    RateLimited {
        retry_after: Option<u64>,
        body: String,
    },

    /// A non-success HTTP status whose body was not an API envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A success status whose body was not an API envelope.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,
}
