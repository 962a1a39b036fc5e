//! Client factory.

use std::sync::Arc;

use crate::cloudflare::CloudflareClientProvider;
use crate::config::{ConfigError, ZonesConfig};
use crate::zones::ZonesClient;

/// Creates a Cloudflare-backed [`ZonesClient`] from `config`.
///
/// The configuration is validated and one shared HTTP client is built; no request
/// is sent until the first operation.
///
/// # Examples
///
/// ```rust
/// use dns_orchestrator_zones::{ConfigError, ZonesConfig, create_zones_client};
///
/// assert!(create_zones_client(ZonesConfig::new("your-token")).is_ok());
/// assert!(matches!(
///     create_zones_client(ZonesConfig::new("")),
///     Err(ConfigError::MissingToken)
/// ));
/// ```
pub fn create_zones_client(config: ZonesConfig) -> Result<ZonesClient, ConfigError> {
    let provider = CloudflareClientProvider::new(&config)?;
    log::debug!("[zones] Client ready for {}", config.base_url());
    Ok(ZonesClient::new(Arc::new(provider)))
}
