use std::sync::Arc;

use async_trait::async_trait;

use crate::cancel::CancelSignal;
use crate::cloudflare::{ApiEnvelope, CreateZoneRequest, ZoneIdResult, ZoneRecord};
use crate::error::{Result, TransportError};
use crate::types::{DomainName, Zone};

/// Result of a raw client-handle call: an envelope of the endpoint's own shape,
/// or a transport failure. Neither has been classified yet.
pub type TransportResult<T> = std::result::Result<ApiEnvelope<T>, TransportError>;

/// 已认证的 Zones API 客户端句柄
///
/// One method per endpoint, each returning that endpoint's envelope untouched.
/// Implementations own authentication, retries and timeouts; they never interpret
/// `success` or the error codes.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// `POST /zones`
    async fn create_zone(&self, request: &CreateZoneRequest) -> TransportResult<ZoneIdResult>;

    /// `GET /zones?name={name}`
    async fn list_zones_by_name(&self, name: &str) -> TransportResult<Vec<ZoneRecord>>;

    /// `GET /zones/{zone_id}`
    async fn get_zone(&self, zone_id: &str) -> TransportResult<ZoneRecord>;

    /// `DELETE /zones/{zone_id}`
    async fn delete_zone(&self, zone_id: &str) -> TransportResult<ZoneIdResult>;
}

/// Hands out ready-to-use [`ZoneApi`] handles.
///
/// Connection pooling and credential lifetime are the provider's business; the
/// operations ask for a handle on every call and drop it afterwards.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    async fn get_client(
        &self,
        cancel: &CancelSignal,
    ) -> std::result::Result<Arc<dyn ZoneApi>, TransportError>;
}

/// 域名 → Zone 解析
///
/// Only [`find`](Self::find) is required; the lookup methods are derived from it.
/// Substitute a fake in tests to drive the lifecycle and query operations.
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// The first zone the service returns for `domain`, in service order.
    ///
    /// `Ok(None)` when there is no match, or when the first match has no usable id.
    async fn find(&self, domain: &DomainName, cancel: &CancelSignal) -> Result<Option<Zone>>;

    /// Identifier of the zone for `domain`; `None` if there is none.
    ///
    /// A classified `NotFound` from the lookup is absorbed into `None`; every other
    /// error is returned.
    async fn resolve_id(
        &self,
        domain: &DomainName,
        cancel: &CancelSignal,
    ) -> Result<Option<String>> {
        match self.find(domain, cancel).await {
            Ok(zone) => Ok(zone.map(|zone| zone.id)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Whether a zone exists for `domain`. Absence is `Ok(false)`, never an error.
    async fn exists(&self, domain: &DomainName, cancel: &CancelSignal) -> Result<bool> {
        Ok(self.resolve_id(domain, cancel).await?.is_some())
    }
}
