//! In-memory repository for tests
//!
//! Behaves like the server as far as the reconciler can tell: the name filter
//! is a substring match, writes answer with an id, and every write is
//! recorded so tests can count and inspect them.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use elkar_client::{ClientError, WriteOutcome};
use elkar_core::dto::error::StructuredError;
use elkar_core::dto::remote::Remote;
use elkar_core::{Resource, ResourceId, ResourceKind};
use serde_json::Value;

use crate::repository::ResourceRepository;

/// A write the backend received
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Create { kind: ResourceKind, name: String },
    Update { kind: ResourceKind, id: ResourceId, payload: Value },
    Delete { kind: ResourceKind, id: ResourceId },
}

pub struct MemoryBackend {
    store: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    writes: Mutex<Vec<Write>>,
    reads: AtomicUsize,
    next_id: AtomicI64,
    rejection: Mutex<Option<StructuredError>>,
    offline: Mutex<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            reads: AtomicUsize::new(0),
            next_id: AtomicI64::new(1),
            rejection: Mutex::new(None),
            offline: Mutex::new(false),
        }
    }

    /// Store a resource directly, without recording a write
    pub fn seed<R: Resource>(&self, resource: R) -> ResourceId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.put(&Remote::new(id, resource));
        id
    }

    /// Store a raw object, e.g. one carrying fields outside the schema
    pub fn seed_raw(&self, kind: ResourceKind, object: Value) {
        self.store.lock().unwrap().entry(kind).or_default().push(object);
    }

    pub fn get<R: Resource>(&self, id: ResourceId) -> Option<Remote<R>> {
        self.raw(R::KIND, id)
            .map(|value| serde_json::from_value(value).unwrap())
    }

    pub fn raw(&self, kind: ResourceKind, id: ResourceId) -> Option<Value> {
        self.store
            .lock()
            .unwrap()
            .get(&kind)
            .and_then(|items| items.iter().find(|v| v["id"] == id).cloned())
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.store
            .lock()
            .unwrap()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Answer every following write with `body` and no id
    pub fn reject_writes(&self, body: StructuredError) {
        *self.rejection.lock().unwrap() = Some(body);
    }

    /// Fail every following request at the transport level
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn put<R: Resource>(&self, remote: &Remote<R>) {
        let value = serde_json::to_value(remote).unwrap();
        let mut store = self.store.lock().unwrap();
        let items = store.entry(R::KIND).or_default();
        items.retain(|v| v["id"] != remote.id);
        items.push(value);
    }

    fn record(&self, write: Write) {
        self.writes.lock().unwrap().push(write);
    }

    fn check_online(&self) -> elkar_client::Result<()> {
        if *self.offline.lock().unwrap() {
            return Err(ClientError::api_error(503, "Service Unavailable"));
        }
        Ok(())
    }

    fn rejection(&self) -> Option<StructuredError> {
        self.rejection.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for MemoryBackend {
    async fn list_by_name(&self, name: &str) -> elkar_client::Result<Vec<Remote<R>>> {
        self.check_online()?;
        self.reads.fetch_add(1, Ordering::SeqCst);

        let store = self.store.lock().unwrap();
        let matches = store
            .get(&R::KIND)
            .map(|items| {
                items
                    .iter()
                    .filter(|v| v["name"].as_str().is_some_and(|n| n.contains(name)))
                    .map(|v| serde_json::from_value(v.clone()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        Ok(matches.unwrap_or_default())
    }

    async fn create(&self, resource: &R) -> elkar_client::Result<WriteOutcome<ResourceId>> {
        self.check_online()?;
        self.record(Write::Create {
            kind: R::KIND,
            name: resource.name().to_string(),
        });

        if let Some(body) = self.rejection() {
            return Ok(WriteOutcome::Rejected(body));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.put(&Remote::new(id, resource.clone()));
        Ok(WriteOutcome::Accepted(id))
    }

    async fn update(&self, remote: &Remote<R>) -> elkar_client::Result<WriteOutcome<ResourceId>> {
        self.check_online()?;
        self.record(Write::Update {
            kind: R::KIND,
            id: remote.id,
            payload: serde_json::to_value(remote).unwrap(),
        });

        if let Some(body) = self.rejection() {
            return Ok(WriteOutcome::Rejected(body));
        }

        self.put(remote);
        Ok(WriteOutcome::Accepted(remote.id))
    }

    async fn delete(&self, id: ResourceId) -> elkar_client::Result<WriteOutcome<()>> {
        self.check_online()?;
        self.record(Write::Delete { kind: R::KIND, id });

        if let Some(body) = self.rejection() {
            return Ok(WriteOutcome::Rejected(body));
        }

        let mut store = self.store.lock().unwrap();
        let items = store.entry(R::KIND).or_default();
        let before = items.len();
        items.retain(|v| v["id"] != id);

        if items.len() == before {
            return Ok(WriteOutcome::Rejected(StructuredError::from_body(
                404,
                "Not Found",
            )));
        }
        Ok(WriteOutcome::Accepted(()))
    }
}
