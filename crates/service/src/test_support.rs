#![cfg(test)]
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::HttpError;
use models::RecordId;
use serde_json::Value;

use crate::gateway::RecordGateway;

/// In-process stand-in for the REST backend. Ids are compared by their
/// textual form, the way json-server does it.
#[derive(Default)]
pub struct MemoryGateway {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    numeric_ids: bool,
    next_id: AtomicU64,
    lookup_broken: AtomicBool,
    collection_payload: Mutex<Option<Value>>,
    insert_response: Mutex<Option<Value>>,
    failure: Mutex<Option<HttpError>>,
    requests: AtomicUsize,
    fetch_all_calls: AtomicUsize,
}

fn not_found() -> HttpError { HttpError::Status { status: 404, body: String::new() } }

fn same_id(record: &Value, id: &RecordId) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => *s == id.to_string(),
        Some(Value::Number(n)) => n.to_string() == id.to_string(),
        _ => false,
    }
}

impl MemoryGateway {
    /// Assigns short hex string ids on insert.
    pub fn empty() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn with_numeric_ids() -> Arc<Self> { Arc::new(Self { numeric_ids: true, ..Self::default() }) }

    pub fn seeded(collection: &str, records: impl IntoIterator<Item = Value>) -> Arc<Self> {
        let gw = Self::default();
        gw.collections.lock().unwrap().insert(collection.to_string(), records.into_iter().collect());
        Arc::new(gw)
    }

    /// Make every `fetch_one` answer 404 regardless of contents.
    pub fn set_lookup_broken(&self, broken: bool) { self.lookup_broken.store(broken, Ordering::SeqCst); }

    /// Answer `fetch_all` with this payload instead of the stored records.
    pub fn set_collection_payload(&self, payload: Value) { *self.collection_payload.lock().unwrap() = Some(payload); }

    pub fn set_insert_response(&self, response: Value) { *self.insert_response.lock().unwrap() = Some(response); }

    pub fn fail_next(&self, err: HttpError) { *self.failure.lock().unwrap() = Some(err); }

    pub fn request_count(&self) -> usize { self.requests.load(Ordering::SeqCst) }

    pub fn fetch_all_calls(&self) -> usize { self.fetch_all_calls.load(Ordering::SeqCst) }

    fn enter(&self) -> Result<(), HttpError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> Value {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        if self.numeric_ids { Value::from(n) } else { Value::String(format!("{:04x}", 0xa000 + n)) }
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    async fn fetch_all(&self, collection: &str) -> Result<Value, HttpError> {
        self.enter()?;
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(payload) = self.collection_payload.lock().unwrap().clone() {
            return Ok(payload);
        }
        let map = self.collections.lock().unwrap();
        Ok(Value::Array(map.get(collection).cloned().unwrap_or_default()))
    }

    async fn fetch_one(&self, collection: &str, id: &RecordId) -> Result<Value, HttpError> {
        self.enter()?;
        if self.lookup_broken.load(Ordering::SeqCst) {
            return Err(not_found());
        }
        let map = self.collections.lock().unwrap();
        map.get(collection)
            .and_then(|records| records.iter().find(|r| same_id(r, id)).cloned())
            .ok_or_else(not_found)
    }

    async fn insert(&self, collection: &str, mut body: Value) -> Result<Value, HttpError> {
        self.enter()?;
        if let Some(response) = self.insert_response.lock().unwrap().clone() {
            return Ok(response);
        }
        body["id"] = self.next_id();
        self.collections.lock().unwrap().entry(collection.to_string()).or_default().push(body.clone());
        Ok(body)
    }

    async fn replace(&self, collection: &str, id: &RecordId, body: Value) -> Result<(), HttpError> {
        self.enter()?;
        let mut map = self.collections.lock().unwrap();
        let slot = map
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| same_id(r, id)))
            .ok_or_else(not_found)?;
        *slot = body;
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &RecordId) -> Result<(), HttpError> {
        self.enter()?;
        let mut map = self.collections.lock().unwrap();
        let records = map.get_mut(collection).ok_or_else(not_found)?;
        let pos = records.iter().position(|r| same_id(r, id)).ok_or_else(not_found)?;
        records.remove(pos);
        Ok(())
    }
}
