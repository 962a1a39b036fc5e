//! Name-keyed zone client.

use std::sync::Arc;

use crate::cancel::CancelSignal;
use crate::error::Result;
use crate::lifecycle;
use crate::query;
use crate::resolver::ApiZoneResolver;
use crate::traits::{ClientProvider, ZoneResolver};
use crate::types::{AccountId, DomainName, EnsuredZone, Zone};

/// Zone lifecycle and queries keyed by domain name.
///
/// Every method validates its arguments before any remote call; a malformed
/// domain name or account id yields [`ZoneError::InvalidInput`](crate::ZoneError::InvalidInput)
/// without touching the network. Nothing is cached between calls.
///
/// ```rust,no_run
/// use dns_orchestrator_zones::{CancelSignal, ZonesConfig, create_zones_client};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = create_zones_client(ZonesConfig::from_env()?)?;
/// let cancel = CancelSignal::never();
///
/// if !client.exists("example.com", &cancel).await? {
///     let id = client.add("example.com", "your-account-id", &cancel).await?;
///     println!("created zone {id}");
/// }
/// for ns in client.get_nameservers("example.com", &cancel).await? {
///     println!("{ns}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ZonesClient {
    provider: Arc<dyn ClientProvider>,
    resolver: Arc<dyn ZoneResolver>,
}

impl ZonesClient {
    /// A client resolving names through `provider`'s zone listing.
    #[must_use]
    pub fn new(provider: Arc<dyn ClientProvider>) -> Self {
        let resolver = Arc::new(ApiZoneResolver::new(provider.clone()));
        Self { provider, resolver }
    }

    /// A client with a custom resolver.
    #[must_use]
    pub fn with_resolver(
        provider: Arc<dyn ClientProvider>,
        resolver: Arc<dyn ZoneResolver>,
    ) -> Self {
        Self { provider, resolver }
    }

    /// Create a full-setup zone and return the service-assigned id.
    ///
    /// Not idempotent: an existing zone surfaces as a `Conflict` rejection. See
    /// [`ensure`](Self::ensure) for create-if-absent.
    pub async fn add(
        &self,
        domain_name: &str,
        account_id: &str,
        cancel: &CancelSignal,
    ) -> Result<String> {
        let domain = parse_domain(domain_name)?;
        let account = AccountId::parse(account_id).inspect_err(|e| log::warn!("[zones] {e}"))?;

        log::info!("[zones] Creating zone '{domain}'");
        let id = logged(
            "create zone",
            &domain,
            lifecycle::add(self.provider.as_ref(), &domain, &account, cancel).await,
        )?;
        log::info!("[zones] Created zone '{domain}' ({id})");
        Ok(id)
    }

    /// Whether a zone exists for the domain. Absence is `Ok(false)`.
    pub async fn exists(&self, domain_name: &str, cancel: &CancelSignal) -> Result<bool> {
        let domain = parse_domain(domain_name)?;
        logged(
            "check zone",
            &domain,
            self.resolver.exists(&domain, cancel).await,
        )
    }

    /// The zone id for the domain, or `None` if there is no zone.
    pub async fn get_id(&self, domain_name: &str, cancel: &CancelSignal) -> Result<Option<String>> {
        let domain = parse_domain(domain_name)?;
        logged(
            "resolve zone",
            &domain,
            self.resolver.resolve_id(&domain, cancel).await,
        )
    }

    /// Full zone details. A missing zone is [`ZoneError::NotFound`](crate::ZoneError::NotFound).
    pub async fn get(&self, domain_name: &str, cancel: &CancelSignal) -> Result<Zone> {
        let domain = parse_domain(domain_name)?;
        logged(
            "get zone",
            &domain,
            query::get(self.resolver.as_ref(), &domain, cancel).await,
        )
    }

    /// The zone's nameservers in service order; never an empty list.
    pub async fn get_nameservers(
        &self,
        domain_name: &str,
        cancel: &CancelSignal,
    ) -> Result<Vec<String>> {
        let domain = parse_domain(domain_name)?;
        logged(
            "get nameservers",
            &domain,
            query::get_nameservers(self.resolver.as_ref(), &domain, cancel).await,
        )
    }

    /// Delete the zone. `Ok(false)` if there was nothing to delete.
    pub async fn remove(&self, domain_name: &str, cancel: &CancelSignal) -> Result<bool> {
        let domain = parse_domain(domain_name)?;

        log::info!("[zones] Removing zone '{domain}'");
        let removed = logged(
            "remove zone",
            &domain,
            lifecycle::remove(
                self.provider.as_ref(),
                self.resolver.as_ref(),
                &domain,
                cancel,
            )
            .await,
        )?;
        if removed {
            log::info!("[zones] Removed zone '{domain}'");
        }
        Ok(removed)
    }

    /// Zone details by service-assigned id.
    pub async fn get_by_id(&self, zone_id: &str, cancel: &CancelSignal) -> Result<Zone> {
        let result = query::get_by_id(self.provider.as_ref(), zone_id, cancel).await;
        logged("get zone by id", zone_id, result)
    }

    /// Return the zone for the domain, creating it if absent.
    pub async fn ensure(
        &self,
        domain_name: &str,
        account_id: &str,
        cancel: &CancelSignal,
    ) -> Result<EnsuredZone> {
        let domain = parse_domain(domain_name)?;
        let account = AccountId::parse(account_id).inspect_err(|e| log::warn!("[zones] {e}"))?;

        let ensured = logged(
            "ensure zone",
            &domain,
            lifecycle::ensure(
                self.provider.as_ref(),
                self.resolver.as_ref(),
                &domain,
                &account,
                cancel,
            )
            .await,
        )?;
        if ensured.created {
            log::info!("[zones] Created zone '{domain}' ({})", ensured.id);
        }
        Ok(ensured)
    }
}

fn parse_domain(domain_name: &str) -> Result<DomainName> {
    DomainName::parse(domain_name).inspect_err(|e| log::warn!("[zones] {e}"))
}

/// Log a failed operation at a level matching [`is_expected`](crate::ZoneError::is_expected).
fn logged<T>(operation: &str, subject: impl std::fmt::Display, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        if e.is_expected() {
            log::warn!("[zones] Failed to {operation} '{subject}': {e}");
        } else {
            log::error!("[zones] Failed to {operation} '{subject}': {e}");
        }
    }
    result
}
