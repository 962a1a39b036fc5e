//! Log sanitization utilities
//!
//! Keeps response bodies short in debug/error logs and keeps API tokens out of
//! them entirely.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret, leaving only a short prefix: `"abcd****"`.
///
/// Secrets no longer than the visible prefix are masked completely.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= VISIBLE_SECRET_CHARS {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE_SECRET_CHARS).collect();
    format!("{prefix}****")
}
