//! Cloudflare Zones API client

mod api;
mod http;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::cancel::CancelSignal;
use crate::config::{ConfigError, ZonesConfig};
use crate::error::TransportError;
use crate::http_client::create_http_client;
use crate::traits::{ClientProvider, ZoneApi};

pub use types::{
    AccountRef, ApiEnvelope, ApiMessage, CreateZoneRequest, ResultInfo, ZoneAccount,
    ZoneIdResult, ZoneRecord,
};

/// Bearer-token client for the Cloudflare v4 Zones endpoints.
pub struct CloudflareApi {
    pub(crate) client: Client,
    pub(crate) api_base: String,
    pub(crate) api_token: String,
    pub(crate) max_retries: u32,
}

impl CloudflareApi {
    pub fn new(config: &ZonesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            client: create_http_client(config)?,
            api_base: config.base_url().to_string(),
            api_token: config.api_token.clone(),
            max_retries: config.max_retries,
        })
    }
}

/// [`ClientProvider`] sharing one [`CloudflareApi`] across all calls.
pub struct CloudflareClientProvider {
    api: Arc<CloudflareApi>,
}

impl CloudflareClientProvider {
    pub fn new(config: &ZonesConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            api: Arc::new(CloudflareApi::new(config)?),
        })
    }
}

#[async_trait]
impl ClientProvider for CloudflareClientProvider {
    async fn get_client(
        &self,
        _cancel: &CancelSignal,
    ) -> Result<Arc<dyn ZoneApi>, TransportError> {
        Ok(self.api.clone())
    }
}
