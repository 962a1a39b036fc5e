//! Cloudflare ZoneApi trait 实现

use async_trait::async_trait;

use crate::traits::{TransportResult, ZoneApi};

use super::{CloudflareApi, CreateZoneRequest, ZoneIdResult, ZoneRecord};

fn zone_path(zone_id: &str) -> String {
    format!("/zones/{}", urlencoding::encode(zone_id))
}

#[async_trait]
impl ZoneApi for CloudflareApi {
    async fn create_zone(&self, request: &CreateZoneRequest) -> TransportResult<ZoneIdResult> {
        self.post("/zones", request).await
    }

    async fn list_zones_by_name(&self, name: &str) -> TransportResult<Vec<ZoneRecord>> {
        self.get("/zones", &[("name", name)]).await
    }

    async fn get_zone(&self, zone_id: &str) -> TransportResult<ZoneRecord> {
        self.get(&zone_path(zone_id), &[]).await
    }

    async fn delete_zone(&self, zone_id: &str) -> TransportResult<ZoneIdResult> {
        self.delete(&zone_path(zone_id)).await
    }
}
