use std::marker::PhantomData;
use std::sync::Arc;

use common::HttpError;
use configs::AppConfig;
use models::envelope::decode_records;
use models::{IdentifierPolicy, Normalize, RecordId, Resource, Validate};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::{Operation, ServiceError};
use crate::gateway::{HttpGateway, RecordGateway};
use crate::pagination::{filter_by_display, page_count, Page, DEFAULT_PAGE_LENGTH};
use crate::submission::{AfterSave, SaveIntent, SubmissionState};

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<R> {
    pub items: Vec<R>,
    /// Size of the filtered collection before windowing.
    pub total_count: usize,
}

impl<R> Listing<R> {
    pub fn page_count(&self, page_length: u32) -> usize { page_count(self.total_count, page_length) }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// List/get/create/update/delete for one record type.
///
/// Holds no state between calls; every operation is a fresh round trip.
/// The identifier policy is fixed at construction and applied to every id
/// going out and coming back.
pub struct ResourceService<R: Resource, G: RecordGateway = HttpGateway> {
    gateway: Arc<G>,
    policy: IdentifierPolicy,
    page_length: u32,
    _record: PhantomData<fn() -> R>,
}

impl<R: Resource, G: RecordGateway> Clone for ResourceService<R, G> {
    fn clone(&self) -> Self {
        Self { gateway: Arc::clone(&self.gateway), policy: self.policy, page_length: self.page_length, _record: PhantomData }
    }
}

impl<R: Resource, G: RecordGateway> ResourceService<R, G> {
    pub fn new(gateway: Arc<G>, policy: IdentifierPolicy, page_length: u32) -> Self {
        let page_length = if page_length == 0 { DEFAULT_PAGE_LENGTH } else { page_length };
        Self { gateway, policy, page_length, _record: PhantomData }
    }

    pub fn from_config(gateway: Arc<G>, cfg: &AppConfig) -> Self {
        Self::new(gateway, cfg.identifiers.policy, cfg.listing.page_length)
    }

    pub fn policy(&self) -> IdentifierPolicy { self.policy }

    pub fn page_length(&self) -> u32 { self.page_length }

    /// Fetch the whole collection, filter it on the display field and cut
    /// out `page` (1-based) unless `bypass_pagination` is set.
    #[instrument(skip(self), fields(collection = R::COLLECTION))]
    pub async fn list(&self, page: u32, filter: &str, bypass_pagination: bool) -> Result<Listing<R>, ServiceError> {
        let payload = match self.gateway.fetch_all(R::COLLECTION).await {
            Ok(payload) => payload,
            Err(HttpError::Decode(detail)) => {
                warn!(%detail, "malformed collection payload; treating as empty");
                Value::Null
            }
            Err(e) => return Err(ServiceError::from_http::<R>(Operation::List, e)),
        };

        let filtered = filter_by_display(self.decode_all(payload), filter);
        let total_count = filtered.len();
        let items = if bypass_pagination { filtered } else { Page::new(page, self.page_length).window(filtered) };
        debug!(total_count, returned = items.len(), "records listed");
        Ok(Listing { items, total_count })
    }

    /// Fetch one record. Under the preserving policy a 404 falls back to
    /// searching the full collection, which covers backends whose id routing
    /// disagrees with the ids they list.
    #[instrument(skip(self, id), fields(collection = R::COLLECTION, id = %id))]
    pub async fn get(&self, id: &RecordId) -> Result<R, ServiceError> {
        let id = self.policy.normalize_id(id);
        if id.is_new() {
            return Err(ServiceError::not_found::<R>());
        }
        match self.gateway.fetch_one(R::COLLECTION, &id).await {
            Ok(raw) => R::from_raw(&raw, self.policy)
                .ok_or_else(|| ServiceError::request(Operation::Get, "registro sem os campos obrigatórios")),
            Err(e) if e.is_not_found() && self.policy == IdentifierPolicy::Preserving => self.find_in_collection(&id).await,
            Err(e) => Err(ServiceError::from_http::<R>(Operation::Get, e)),
        }
    }

    async fn find_in_collection(&self, id: &RecordId) -> Result<R, ServiceError> {
        debug!(%id, "not found by id; searching full collection");
        let all = self.list(1, "", true).await?;
        all.items.into_iter().find(|r| r.id().matches(id)).ok_or_else(ServiceError::not_found::<R>)
    }

    /// Submit a new record and return the id the backend assigned.
    #[instrument(skip(self, draft), fields(collection = R::COLLECTION))]
    pub async fn create(&self, draft: R::Draft) -> Result<RecordId, ServiceError> {
        let body = serde_json::to_value(&draft).map_err(|e| ServiceError::request(Operation::Create, e))?;
        let created = self
            .gateway
            .insert(R::COLLECTION, body)
            .await
            .map_err(|e| ServiceError::from_http::<R>(Operation::Create, e))?;

        let id = match created.get("id") {
            None | Some(Value::Null) => RecordId::New,
            raw => self.policy.normalize(raw),
        };
        if id.is_new() {
            return Err(ServiceError::request(Operation::Create, "backend não retornou o id"));
        }
        info!(%id, "record created");
        Ok(id)
    }

    /// Replace the stored record with `record`. Not a patch: `record` must be
    /// the complete current state; its id is overwritten with `id`.
    #[instrument(skip(self, id, record), fields(collection = R::COLLECTION, id = %id))]
    pub async fn update_by_id(&self, id: &RecordId, record: R) -> Result<(), ServiceError> {
        let id = self.policy.normalize_id(id);
        if id.is_new() {
            return Err(ServiceError::not_found::<R>());
        }
        let body = serde_json::to_value(record.with_id(id.clone())).map_err(|e| ServiceError::request(Operation::Update, e))?;
        self.gateway
            .replace(R::COLLECTION, &id, body)
            .await
            .map_err(|e| ServiceError::from_http::<R>(Operation::Update, e))?;
        info!(%id, "record updated");
        Ok(())
    }

    /// Delete by id. Deleting twice yields the not-found error.
    #[instrument(skip(self, id), fields(collection = R::COLLECTION, id = %id))]
    pub async fn delete_by_id(&self, id: &RecordId) -> Result<(), ServiceError> {
        let id = self.policy.normalize_id(id);
        if id.is_new() {
            return Err(ServiceError::not_found::<R>());
        }
        self.gateway
            .remove(R::COLLECTION, &id)
            .await
            .map_err(|e| ServiceError::from_http::<R>(Operation::Delete, e))?;
        info!(%id, "record deleted");
        Ok(())
    }

    /// Validate then create (`target` is [`RecordId::New`]) or fully update
    /// `target`. Nothing is sent when validation fails.
    pub async fn save(
        &self,
        state: &mut SubmissionState,
        target: &RecordId,
        draft: R::Draft,
        intent: SaveIntent,
    ) -> Result<AfterSave, ServiceError> {
        state.begin()?;
        if let Err(errors) = draft.validate() {
            debug!(collection = R::COLLECTION, %errors, "submission rejected by validation");
            state.reset();
            return Err(ServiceError::Validation(errors));
        }

        state.submitting();
        let saved = if target.is_new() {
            self.create(draft).await
        } else {
            self.update_by_id(target, R::from_draft(target.clone(), draft))
                .await
                .map(|()| self.policy.normalize_id(target))
        };

        match saved {
            Ok(id) => {
                state.finish();
                Ok(intent.after(id))
            }
            Err(e) => {
                state.reset();
                Err(e)
            }
        }
    }

    fn decode_all(&self, payload: Value) -> Vec<R> {
        let raw = decode_records(payload);
        let received = raw.len();
        let records: Vec<R> = raw.iter().filter_map(|r| R::from_raw(r, self.policy)).collect();
        if records.len() < received {
            warn!(collection = R::COLLECTION, dropped = received - records.len(), "discarded records failing the shape check");
        }
        records
    }
}
