//! Single shared HTTP client bound to the backend base URL.

pub mod interceptors;

use std::time::Duration;

use configs::ApiConfig;
use reqwest::{RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::HttpError;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, HttpError> {
        let base = Url::parse(&cfg.base_url).map_err(|e| HttpError::Request(format!("base_url inválida: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(HttpError::Request(format!("base_url inválida: {}", cfg.base_url)));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url { &self.base }

    /// Join path segments (percent-encoded) and query pairs onto the base URL.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, HttpError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| HttpError::Request(format!("base_url inválida: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub async fn get_json(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, HttpError> {
        let url = self.url(segments, query)?;
        debug!(%url, method = "GET", "backend request");
        let resp = self.send(self.http.get(url)).await?;
        read_json(resp).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<Value, HttpError> {
        let url = self.url(segments, &[])?;
        debug!(%url, method = "POST", "backend request");
        let resp = self.send(self.http.post(url).json(body)).await?;
        read_json(resp).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<(), HttpError> {
        let url = self.url(segments, &[])?;
        debug!(%url, method = "PUT", "backend request");
        self.send(self.http.put(url).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), HttpError> {
        let url = self.url(segments, &[])?;
        debug!(%url, method = "DELETE", "backend request");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, HttpError> {
        let resp = req.send().await.map_err(interceptors::on_transport_error)?;
        let resp = interceptors::on_response(resp);
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(interceptors::on_status(status, body))
    }
}

/// Empty bodies (e.g. 204) read as `null`.
async fn read_json(resp: Response) -> Result<Value, HttpError> {
    let bytes = resp.bytes().await.map_err(interceptors::on_body_error)?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| HttpError::Decode(e.to_string()))
}
