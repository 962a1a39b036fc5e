//! 测试辅助模块
//!
//! Scripted fakes for the client handle, provider and resolver.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cancel::CancelSignal;
use crate::cloudflare::{ApiEnvelope, CreateZoneRequest, ZoneAccount, ZoneIdResult, ZoneRecord};
use crate::error::{Result, TransportError};
use crate::traits::{ClientProvider, TransportResult, ZoneApi, ZoneResolver};
use crate::types::{DomainName, Zone};

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const ACCOUNT_ID: &str = "01a7362d577a6c3019a474fd6f485823";

// ===== Fixtures =====

pub fn zone_record(id: &str, name: &str) -> ZoneRecord {
    ZoneRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        status: Some("active".to_string()),
        zone_type: Some("full".to_string()),
        paused: Some(false),
        account: Some(ZoneAccount {
            id: Some(ACCOUNT_ID.to_string()),
            name: Some("Demo Account".to_string()),
        }),
        name_servers: Some(vec![
            "bob.ns.cloudflare.com".to_string(),
            "lola.ns.cloudflare.com".to_string(),
        ]),
        ..ZoneRecord::default()
    }
}

pub fn created(id: &str) -> TransportResult<ZoneIdResult> {
    Ok(ApiEnvelope::ok(ZoneIdResult {
        id: Some(id.to_string()),
    }))
}

pub fn listed(records: Vec<ZoneRecord>) -> TransportResult<Vec<ZoneRecord>> {
    Ok(ApiEnvelope::ok(records))
}

pub fn domain(name: &str) -> DomainName {
    DomainName::parse(name).unwrap()
}

// ===== Script =====

/// Queued responses; the last one repeats once the queue is down to it.
struct Script<T>(VecDeque<TransportResult<T>>);

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self(VecDeque::new())
    }

    fn next(&mut self, endpoint: &str) -> TransportResult<T> {
        if self.0.len() > 1 {
            if let Some(response) = self.0.pop_front() {
                return response;
            }
        }
        self.0.front().cloned().unwrap_or_else(|| {
            Err(TransportError::Network(format!(
                "no scripted response for {endpoint}"
            )))
        })
    }
}

// ===== FakeZoneApi =====

pub struct FakeZoneApi {
    create: RwLock<Script<ZoneIdResult>>,
    list: RwLock<Script<Vec<ZoneRecord>>>,
    get: RwLock<Script<ZoneRecord>>,
    delete: RwLock<Script<ZoneIdResult>>,
    created: RwLock<Vec<CreateZoneRequest>>,
    listed: RwLock<Vec<String>>,
    fetched: RwLock<Vec<String>>,
    deleted: RwLock<Vec<String>>,
}

impl FakeZoneApi {
    pub fn new() -> Self {
        Self {
            create: RwLock::new(Script::new()),
            list: RwLock::new(Script::new()),
            get: RwLock::new(Script::new()),
            delete: RwLock::new(Script::new()),
            created: RwLock::new(Vec::new()),
            listed: RwLock::new(Vec::new()),
            fetched: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
        }
    }

    pub fn on_create(mut self, response: TransportResult<ZoneIdResult>) -> Self {
        self.create.get_mut().0.push_back(response);
        self
    }

    pub fn on_list(mut self, response: TransportResult<Vec<ZoneRecord>>) -> Self {
        self.list.get_mut().0.push_back(response);
        self
    }

    pub fn on_get(mut self, response: TransportResult<ZoneRecord>) -> Self {
        self.get.get_mut().0.push_back(response);
        self
    }

    pub fn on_delete(mut self, response: TransportResult<ZoneIdResult>) -> Self {
        self.delete.get_mut().0.push_back(response);
        self
    }

    pub async fn created(&self) -> Vec<CreateZoneRequest> {
        self.created.read().await.clone()
    }

    pub async fn listed(&self) -> Vec<String> {
        self.listed.read().await.clone()
    }

    pub async fn fetched(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }

    /// Requests of any kind received so far.
    pub async fn total_calls(&self) -> usize {
        self.created.read().await.len()
            + self.listed.read().await.len()
            + self.fetched.read().await.len()
            + self.deleted.read().await.len()
    }
}

#[async_trait]
impl ZoneApi for FakeZoneApi {
    async fn create_zone(&self, request: &CreateZoneRequest) -> TransportResult<ZoneIdResult> {
        self.created.write().await.push(request.clone());
        self.create.write().await.next("create_zone")
    }

    async fn list_zones_by_name(&self, name: &str) -> TransportResult<Vec<ZoneRecord>> {
        self.listed.write().await.push(name.to_string());
        self.list.write().await.next("list_zones_by_name")
    }

    async fn get_zone(&self, zone_id: &str) -> TransportResult<ZoneRecord> {
        self.fetched.write().await.push(zone_id.to_string());
        self.get.write().await.next("get_zone")
    }

    async fn delete_zone(&self, zone_id: &str) -> TransportResult<ZoneIdResult> {
        self.deleted.write().await.push(zone_id.to_string());
        self.delete.write().await.next("delete_zone")
    }
}

// ===== FakeProvider =====

pub struct FakeProvider {
    pub api: Arc<FakeZoneApi>,
    failure: Option<TransportError>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(api: FakeZoneApi) -> Self {
        Self {
            api: Arc::new(api),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose `get_client` always fails with `failure`.
    pub fn failing(failure: TransportError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(FakeZoneApi::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientProvider for FakeProvider {
    async fn get_client(
        &self,
        _cancel: &CancelSignal,
    ) -> std::result::Result<Arc<dyn ZoneApi>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.api.clone()),
        }
    }
}

// ===== FakeResolver =====

/// Resolver answering every lookup with one fixed outcome.
pub struct FakeResolver {
    outcome: Result<Option<Zone>>,
    calls: AtomicUsize,
}

impl FakeResolver {
    pub fn new(outcome: Result<Option<Zone>>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_zone(id: &str, name: &str) -> Self {
        Self::new(Ok(zone_record(id, name).into_zone(None)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneResolver for FakeResolver {
    async fn find(&self, _domain: &DomainName, _cancel: &CancelSignal) -> Result<Option<Zone>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
