use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};

/// Maximum length of a host name, without the trailing dot.
const MAX_NAME_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

// ============ Input Types ============

/// A syntactically valid DNS host name, e.g. `example.com`.
///
/// Validation is purely syntactic: at least two labels, each 1-63 characters of
/// ASCII letters, digits and `-` (not at either end), a non-numeric top-level
/// label, and at most 253 characters overall. One trailing dot is accepted and
/// stripped. Case is preserved; matching is left to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    /// Validate and wrap a domain name.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(invalid_domain("domain name cannot be empty"));
        }

        let name = input.strip_suffix('.').unwrap_or(input);
        if name.len() > MAX_NAME_LEN {
            return Err(invalid_domain(format!(
                "'{name}' is longer than {MAX_NAME_LEN} characters"
            )));
        }

        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid_domain(format!(
                "'{name}' has no top-level domain"
            )));
        }
        for label in &labels {
            check_label(name, label)?;
        }

        if labels
            .last()
            .is_some_and(|tld| tld.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid_domain(format!(
                "'{name}' has a numeric top-level domain"
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_label(name: &str, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(invalid_domain(format!("'{name}' contains an empty label")));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(invalid_domain(format!(
            "label '{label}' is longer than {MAX_LABEL_LEN} characters"
        )));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(invalid_domain(format!(
            "'{name}' contains invalid character {c:?}"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(invalid_domain(format!(
            "label '{label}' cannot start or end with '-'"
        )));
    }
    Ok(())
}

fn invalid_domain(detail: impl Into<String>) -> ZoneError {
    ZoneError::invalid_input("domain_name", detail)
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of the account that will own a new zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Validate and wrap an account id. Must be non-blank with no whitespace or
    /// control characters.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(ZoneError::invalid_input(
                "account_id",
                "account id cannot be empty",
            ));
        }
        if input
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ZoneError::invalid_input(
                "account_id",
                "account id cannot contain whitespace or control characters",
            ));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============ Zone Types ============

/// Lifecycle state of a zone, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    /// Nameservers are delegated and the zone is serving.
    Active,
    /// Waiting for the registrar to delegate to the assigned nameservers.
    Pending,
    /// Just created; the service is still scanning existing records.
    Initializing,
    /// Delegation moved away from the assigned nameservers.
    Moved,
    Deleted,
    Deactivated,
    ReadOnly,
    /// Missing or unrecognized status string.
    Unknown,
}

impl ZoneStatus {
    /// Map the service's status string. Unrecognized values become [`Unknown`](Self::Unknown).
    pub fn from_remote(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "initializing" => Self::Initializing,
            "moved" => Self::Moved,
            "deleted" => Self::Deleted,
            "deactivated" => Self::Deactivated,
            "read only" | "read_only" => Self::ReadOnly,
            _ => Self::Unknown,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// How the zone's DNS is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Full setup: the service is authoritative. The only type this crate creates.
    Full,
    /// CNAME setup.
    Partial,
    Secondary,
    Internal,
}

impl ZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::Secondary => "secondary",
            Self::Internal => "internal",
        }
    }

    pub fn from_remote(zone_type: &str) -> Option<Self> {
        match zone_type.to_ascii_lowercase().as_str() {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            "secondary" => Some(Self::Secondary),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }
}

/// A zone as fetched from the service. Read-only snapshot; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Service-assigned zone identifier.
    pub id: String,
    /// Domain name of the zone.
    pub name: String,
    /// Owning account, when the payload includes it.
    pub account_id: Option<String>,
    pub status: ZoneStatus,
    pub zone_type: Option<ZoneType>,
    /// Whether the zone is paused (DNS only, no proxying).
    pub paused: bool,
    /// Nameservers assigned by the service, in service order. Empty before activation.
    pub name_servers: Vec<String>,
    /// Nameservers the domain used before moving to the service.
    pub original_name_servers: Vec<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub activated_on: Option<DateTime<Utc>>,
}

impl Zone {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Outcome of [`ZonesClient::ensure`](crate::ZonesClient::ensure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsuredZone {
    /// Identifier of the existing or newly created zone.
    pub id: String,
    /// `true` if this call created the zone.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZoneErrorKind;

    #[test]
    fn accepts_common_names() {
        for name in [
            "example.com",
            "sub.example.co.uk",
            "xn--bcher-kva.example",
            "a-b.example.org",
            "123.example.net",
        ] {
            assert!(DomainName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn strips_single_trailing_dot() {
        let d = DomainName::parse("example.com.").unwrap();
        assert_eq!(d.as_str(), "example.com");
        assert!(DomainName::parse("example.com..").is_err());
    }

    #[test]
    fn preserves_case() {
        assert_eq!(DomainName::parse("Example.COM").unwrap().as_str(), "Example.COM");
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "",
            "   ",
            "localhost",
            "example..com",
            ".example.com",
            "exa mple.com",
            " example.com",
            "exam_ple.com",
            "example.com/path",
            "-example.com",
            "example-.com",
            "example.123",
            "contains:example.com",
        ] {
            let err = DomainName::parse(name).unwrap_err();
            assert_eq!(err.kind(), ZoneErrorKind::InvalidInput, "{name:?}");
        }
    }

    #[test]
    fn rejects_overlong_label_and_name() {
        let label = "a".repeat(64);
        assert!(DomainName::parse(&format!("{label}.com")).is_err());
        assert!(DomainName::parse(&format!("{}.com", "a".repeat(63))).is_ok());

        let long = format!("{}.com", ["abcdefghi"; 26].join("."));
        assert!(long.len() > MAX_NAME_LEN);
        assert!(DomainName::parse(&long).is_err());
    }

    #[test]
    fn account_id_validation() {
        assert!(AccountId::parse("023e105f4ecef8ad9ca31a8372d0c353").is_ok());
        assert!(AccountId::parse("").is_err());
        assert!(AccountId::parse("  ").is_err());
        assert!(AccountId::parse("acct 123").is_err());
        assert!(
            matches!(AccountId::parse(""), Err(ZoneError::InvalidInput { param, .. }) if param == "account_id")
        );
    }

    #[test]
    fn zone_status_mapping() {
        assert_eq!(ZoneStatus::from_remote("active"), ZoneStatus::Active);
        assert_eq!(ZoneStatus::from_remote("PENDING"), ZoneStatus::Pending);
        assert_eq!(ZoneStatus::from_remote("read only"), ZoneStatus::ReadOnly);
        assert_eq!(ZoneStatus::from_remote("archived"), ZoneStatus::Unknown);
        assert!(ZoneStatus::Active.is_active());
        assert!(!ZoneStatus::Moved.is_active());
    }

    #[test]
    fn zone_type_round_trip() {
        assert_eq!(ZoneType::from_remote("full"), Some(ZoneType::Full));
        assert_eq!(ZoneType::from_remote("unknown"), None);
        assert_eq!(
            serde_json::to_string(&ZoneType::Full).unwrap(),
            "\"full\""
        );
    }
}
