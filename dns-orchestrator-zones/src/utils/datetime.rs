//! Serde helpers for the optional RFC 3339 timestamps on zone payloads
//! (`created_on`, `modified_on`, `activated_on`).
//!
//! Use with `#[serde(default, with = "crate::utils::datetime")]`. A missing field,
//! `null` and the empty string all read as `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `Option<DateTime<Utc>>` as an optional RFC 3339 string.
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional RFC 3339 string (any offset, fractional seconds allowed).
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp '{s}': {e}"))),
        _ => Ok(None),
    }
}
