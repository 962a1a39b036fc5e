//! # dns-orchestrator-zones
//!
//! Cloudflare zone lifecycle management keyed by domain name instead of the
//! opaque zone id.
//!
//! ## Operations
//!
//! | Method | Returns | Absent zone |
//! |--------|---------|-------------|
//! | [`ZonesClient::add`] | new zone id | n/a (duplicates are a `Conflict` rejection) |
//! | [`ZonesClient::exists`] | `bool` | `Ok(false)` |
//! | [`ZonesClient::get_id`] | `Option<String>` | `Ok(None)` |
//! | [`ZonesClient::get`] | [`Zone`] | [`ZoneError::NotFound`] |
//! | [`ZonesClient::get_nameservers`] | `Vec<String>` | [`ZoneError::NotFound`] |
//! | [`ZonesClient::remove`] | `bool` | `Ok(false)`, no delete sent |
//! | [`ZonesClient::get_by_id`] | [`Zone`] | [`ZoneError::NotFound`] |
//! | [`ZonesClient::ensure`] | [`EnsuredZone`] | created |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_orchestrator_zones::{CancelSignal, ZonesConfig, create_zones_client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Build a client (reads CLOUDFLARE_API_TOKEN etc.)
//!     let client = create_zones_client(ZonesConfig::from_env()?)?;
//!     let cancel = CancelSignal::never();
//!
//!     // 2. Create the zone unless it is already there
//!     let zone = client.ensure("example.com", "your-account-id", &cancel).await?;
//!     println!("zone {} (created: {})", zone.id, zone.created);
//!
//!     // 3. Nameservers to configure at the registrar
//!     for ns in client.get_nameservers("example.com", &cancel).await? {
//!         println!("{ns}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ZoneError>`](ZoneError), one variant per
//! [`ZoneErrorKind`]:
//!
//! - [`ZoneError::InvalidInput`]: malformed domain name or account id; nothing was sent
//! - [`ZoneError::NotFound`]: no zone where one is required
//! - [`ZoneError::RemoteRejected`]: the API answered with a failure (see [`RejectReason`])
//! - [`ZoneError::RemoteUnavailable`]: transport failure, throttling, 5xx or
//!   cancellation (see [`UnavailableReason`])
//! - [`ZoneError::MalformedResponse`]: success without the data the operation needs
//!
//! Transient transport failures are retried with exponential backoff before they
//! surface; zone creation is sent once.
//!
//! ## Cancellation
//!
//! Every operation takes a [`CancelSignal`]. Firing its [`CancelHandle`] abandons the
//! in-flight request and fails the operation with
//! [`UnavailableReason::Cancelled`].

mod cancel;
mod classify;
mod cloudflare;
mod config;
mod error;
mod factory;
mod http_client;
mod lifecycle;
mod query;
mod resolver;
mod traits;
mod types;
mod utils;
mod zones;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{
    RejectReason, Result, TransportError, UnavailableReason, ZoneError, ZoneErrorKind,
};

// Re-export factory and configuration
pub use config::{
    ConfigError, DEFAULT_API_BASE, ENV_API_BASE, ENV_API_TOKEN, ENV_MAX_RETRIES,
    ENV_REQUEST_TIMEOUT, ZonesConfig,
};
pub use factory::create_zones_client;

// Re-export the client and its seams
pub use cancel::{CancelHandle, CancelSignal};
pub use resolver::ApiZoneResolver;
pub use traits::{ClientProvider, TransportResult, ZoneApi, ZoneResolver};
pub use zones::ZonesClient;

// Re-export types
pub use types::{AccountId, DomainName, EnsuredZone, Zone, ZoneStatus, ZoneType};

// Re-export the Cloudflare client handle and wire types
pub use cloudflare::{
    AccountRef, ApiEnvelope, ApiMessage, CloudflareApi, CloudflareClientProvider,
    CreateZoneRequest, ResultInfo, ZoneAccount, ZoneIdResult, ZoneRecord,
};

// Re-export utils module
pub use utils::datetime;
