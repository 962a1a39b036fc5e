//! 域名 → Zone 解析

use std::sync::Arc;

use async_trait::async_trait;

use crate::cancel::CancelSignal;
use crate::classify;
use crate::error::{RejectReason, Result, ZoneError};
use crate::traits::{ClientProvider, ZoneResolver};
use crate::types::{DomainName, Zone};

/// [`ZoneResolver`] backed by the name-filtered zone listing.
pub struct ApiZoneResolver {
    provider: Arc<dyn ClientProvider>,
}

impl ApiZoneResolver {
    #[must_use]
    pub fn new(provider: Arc<dyn ClientProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ZoneResolver for ApiZoneResolver {
    async fn find(&self, domain: &DomainName, cancel: &CancelSignal) -> Result<Option<Zone>> {
        let name = domain.as_str();
        let api = classify::client(self.provider.as_ref(), name, cancel).await?;
        let response = classify::guarded(name, cancel, api.list_zones_by_name(name))
            .await
            .map_err(listing_failure)?;
        let records = classify::envelope(name, response)
            .map_err(listing_failure)?
            .unwrap_or_default();

        if records.len() > 1 {
            log::warn!(
                "[zones] {} zones match '{name}', using the first",
                records.len()
            );
        }

        let Some(first) = records.into_iter().next() else {
            log::debug!("[zones] No zone matches '{name}'");
            return Ok(None);
        };

        let zone = first.into_zone(Some(name));
        if zone.is_none() {
            log::warn!("[zones] First match for '{name}' has no zone id, treating as absent");
        }
        Ok(zone)
    }
}

/// A "not found" from the listing endpoint itself is a routing failure, never an
/// absent zone.
fn listing_failure(err: ZoneError) -> ZoneError {
    match err {
        ZoneError::NotFound {
            domain,
            raw_message,
        } => {
            log::error!("[zones] Zone listing for '{domain}' answered not found");
            ZoneError::RemoteRejected {
                domain,
                reason: RejectReason::InvalidRequest,
                raw_code: None,
                raw_message: raw_message
                    .unwrap_or_else(|| "zone listing endpoint not found".to_string()),
            }
        }
        other => other,
    }
}
