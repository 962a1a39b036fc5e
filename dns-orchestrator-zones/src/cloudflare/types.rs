//! Cloudflare Zones API 类型定义
//!
//! Each endpoint answers with the same envelope but a different `result` shape:
//!
//! | Endpoint | `result` |
//! |----------|----------|
//! | `POST /zones` | [`ZoneIdResult`] |
//! | `GET /zones?name=` | `Vec<ZoneRecord>` |
//! | `GET /zones/{id}` | [`ZoneRecord`] |
//! | `DELETE /zones/{id}` | [`ZoneIdResult`] |
//!
//! Every payload field is optional: failures omit `result` and successes may omit
//! anything; [`ZoneRecord`] converts to [`Zone`] only once an id is present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, DomainName, Zone, ZoneStatus, ZoneType};

/// Cloudflare API 通用响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<ApiMessage>>,
    pub result_info: Option<ResultInfo>,
    /// HTTP status the envelope arrived with; `None` when built locally.
    #[serde(skip)]
    pub http_status: Option<u16>,
}

impl<T> ApiEnvelope<T> {
    /// A successful envelope wrapping `result`.
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: None,
            result_info: None,
            http_status: None,
        }
    }

    /// A successful envelope with no `result`.
    pub fn empty() -> Self {
        Self {
            success: true,
            result: None,
            errors: None,
            result_info: None,
            http_status: None,
        }
    }

    /// Record the HTTP status of the response this envelope came from.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// A failed envelope with a single error record.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            errors: Some(vec![ApiMessage {
                code: Some(code),
                message: message.into(),
            }]),
            result_info: None,
            http_status: None,
        }
    }
}

/// One `{code, message}` entry of an envelope's `errors` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultInfo {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub count: Option<u32>,
    pub total_count: Option<u32>,
}

/// `result` of zone creation and deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneIdResult {
    pub id: Option<String>,
}

/// Account reference embedded in zone payloads and the create body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneAccount {
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Cloudflare Zone 结构（列表与详情共用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub zone_type: Option<String>,
    pub paused: Option<bool>,
    pub account: Option<ZoneAccount>,
    pub name_servers: Option<Vec<String>>,
    pub original_name_servers: Option<Vec<String>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub activated_on: Option<DateTime<Utc>>,
}

impl ZoneRecord {
    /// Convert to a [`Zone`].
    ///
    /// Returns `None` when the record has no usable id, or no name and no
    /// `fallback_name` to stand in for it.
    pub(crate) fn into_zone(self, fallback_name: Option<&str>) -> Option<Zone> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| fallback_name.map(str::to_string))?;

        Some(Zone {
            id,
            name,
            account_id: self.account.and_then(|account| account.id),
            status: self
                .status
                .as_deref()
                .map_or(ZoneStatus::Unknown, ZoneStatus::from_remote),
            zone_type: self.zone_type.as_deref().and_then(ZoneType::from_remote),
            paused: self.paused.unwrap_or(false),
            name_servers: self.name_servers.unwrap_or_default(),
            original_name_servers: self.original_name_servers.unwrap_or_default(),
            created_on: self.created_on,
            modified_on: self.modified_on,
            activated_on: self.activated_on,
        })
    }
}

/// Body of `POST /zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub account: AccountRef,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
}

impl CreateZoneRequest {
    /// A full-setup zone for `domain` owned by `account`.
    pub fn full(domain: &DomainName, account: &AccountId) -> Self {
        Self {
            name: domain.as_str().to_string(),
            account: AccountRef {
                id: account.as_str().to_string(),
            },
            zone_type: ZoneType::Full,
        }
    }
}
