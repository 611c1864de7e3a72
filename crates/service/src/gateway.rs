use async_trait::async_trait;
use common::{ApiClient, HttpError};
use configs::AppConfig;
use models::RecordId;
use serde_json::Value;

/// Raw record access for one backend. Payloads are untyped JSON; shaping them
/// into records is the service's job.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    async fn fetch_all(&self, collection: &str) -> Result<Value, HttpError>;
    async fn fetch_one(&self, collection: &str, id: &RecordId) -> Result<Value, HttpError>;
    async fn insert(&self, collection: &str, body: Value) -> Result<Value, HttpError>;
    async fn replace(&self, collection: &str, id: &RecordId, body: Value) -> Result<(), HttpError>;
    async fn remove(&self, collection: &str, id: &RecordId) -> Result<(), HttpError>;
}

/// REST implementation: `GET|POST /X`, `GET|PUT|DELETE /X/{id}`.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: ApiClient,
    per_page_hint: u32,
}

impl HttpGateway {
    pub fn new(client: ApiClient, per_page_hint: u32) -> Self { Self { client, per_page_hint } }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, HttpError> {
        Ok(Self::new(ApiClient::new(&cfg.api)?, cfg.api.per_page_hint))
    }
}

#[async_trait]
impl RecordGateway for HttpGateway {
    async fn fetch_all(&self, collection: &str) -> Result<Value, HttpError> {
        self.client.get_json(&[collection], &[("_per_page", self.per_page_hint.to_string())]).await
    }

    async fn fetch_one(&self, collection: &str, id: &RecordId) -> Result<Value, HttpError> {
        self.client.get_json(&[collection, &id.to_string()], &[]).await
    }

    async fn insert(&self, collection: &str, body: Value) -> Result<Value, HttpError> {
        self.client.post_json(&[collection], &body).await
    }

    async fn replace(&self, collection: &str, id: &RecordId, body: Value) -> Result<(), HttpError> {
        self.client.put_json(&[collection, &id.to_string()], &body).await
    }

    async fn remove(&self, collection: &str, id: &RecordId) -> Result<(), HttpError> {
        self.client.delete(&[collection, &id.to_string()]).await
    }
}
