//! Zone 查询

use crate::cancel::CancelSignal;
use crate::classify;
use crate::error::{Result, ZoneError};
use crate::traits::{ClientProvider, ZoneResolver};
use crate::types::{DomainName, Zone};

/// Full details of the first zone matching `domain`. Absence is `NotFound`.
pub(crate) async fn get(
    resolver: &dyn ZoneResolver,
    domain: &DomainName,
    cancel: &CancelSignal,
) -> Result<Zone> {
    resolver
        .find(domain, cancel)
        .await?
        .ok_or_else(|| ZoneError::not_found(domain.as_str()))
}

/// Nameservers assigned to the zone for `domain`, in service order.
///
/// Blank entries are dropped. A zone with no nameservers is `MalformedResponse`,
/// never an empty list.
pub(crate) async fn get_nameservers(
    resolver: &dyn ZoneResolver,
    domain: &DomainName,
    cancel: &CancelSignal,
) -> Result<Vec<String>> {
    let zone = get(resolver, domain, cancel).await?;
    let name_servers: Vec<String> = zone
        .name_servers
        .into_iter()
        .filter(|ns| !ns.trim().is_empty())
        .collect();

    if name_servers.is_empty() {
        return Err(ZoneError::malformed(
            domain.as_str(),
            format!("zone {} has no nameservers assigned", zone.id),
        ));
    }
    Ok(name_servers)
}

/// Zone details by identifier. Errors carry the id in place of a domain name.
pub(crate) async fn get_by_id(
    provider: &dyn ClientProvider,
    zone_id: &str,
    cancel: &CancelSignal,
) -> Result<Zone> {
    if zone_id.trim().is_empty() {
        return Err(ZoneError::invalid_input("zone_id", "zone id cannot be empty"));
    }

    let api = classify::client(provider, zone_id, cancel).await?;
    let response = classify::guarded(zone_id, cancel, api.get_zone(zone_id)).await?;
    let record = classify::envelope(zone_id, response)?
        .ok_or_else(|| ZoneError::malformed(zone_id, "zone lookup succeeded without a result"))?;

    record
        .into_zone(None)
        .ok_or_else(|| ZoneError::malformed(zone_id, "zone record lacks an id or name"))
}
