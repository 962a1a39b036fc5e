//! Zone 创建与删除

use crate::cancel::CancelSignal;
use crate::classify;
use crate::cloudflare::CreateZoneRequest;
use crate::error::{Result, ZoneError};
use crate::traits::{ClientProvider, ZoneResolver};
use crate::types::{AccountId, DomainName, EnsuredZone};

/// Create a full-setup zone for `domain` under `account` and return its id.
///
/// Existence is not checked first: a duplicate surfaces as the service's own
/// `Conflict` rejection.
pub(crate) async fn add(
    provider: &dyn ClientProvider,
    domain: &DomainName,
    account: &AccountId,
    cancel: &CancelSignal,
) -> Result<String> {
    let name = domain.as_str();
    let api = classify::client(provider, name, cancel).await?;
    let request = CreateZoneRequest::full(domain, account);
    let response = classify::guarded(name, cancel, api.create_zone(&request)).await?;

    classify::envelope(name, response)?
        .and_then(|result| result.id)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ZoneError::malformed(name, "zone created but no zone id was returned"))
}

/// Delete the zone for `domain`.
///
/// `Ok(false)` when the domain does not resolve; no delete request is sent then.
/// Once resolved, any failure of the delete itself is returned.
pub(crate) async fn remove(
    provider: &dyn ClientProvider,
    resolver: &dyn ZoneResolver,
    domain: &DomainName,
    cancel: &CancelSignal,
) -> Result<bool> {
    let name = domain.as_str();
    let Some(zone_id) = resolver.resolve_id(domain, cancel).await? else {
        log::warn!("[zones] No zone for '{name}', nothing to remove");
        return Ok(false);
    };

    let api = classify::client(provider, name, cancel).await?;
    let response = classify::guarded(name, cancel, api.delete_zone(&zone_id)).await?;
    classify::envelope(name, response)?;

    log::debug!("[zones] Deleted zone {zone_id} for '{name}'");
    Ok(true)
}

/// Return the zone for `domain`, creating it if absent.
///
/// A `Conflict` from the create (another caller won the race) is resolved once
/// more; if the zone is still not visible the rejection is returned.
pub(crate) async fn ensure(
    provider: &dyn ClientProvider,
    resolver: &dyn ZoneResolver,
    domain: &DomainName,
    account: &AccountId,
    cancel: &CancelSignal,
) -> Result<EnsuredZone> {
    if let Some(id) = resolver.resolve_id(domain, cancel).await? {
        return Ok(EnsuredZone { id, created: false });
    }

    match add(provider, domain, account, cancel).await {
        Ok(id) => Ok(EnsuredZone { id, created: true }),
        Err(err) if err.is_conflict() => {
            log::warn!("[zones] '{domain}' appeared concurrently, resolving again");
            match resolver.resolve_id(domain, cancel).await? {
                Some(id) => Ok(EnsuredZone { id, created: false }),
                None => Err(err),
            }
        }
        Err(err) => Err(err),
    }
}
