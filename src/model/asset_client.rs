//! Asset store HTTP client
//!
//! Wraps the five remote calls the console needs. Every request carries the Basic
//! credential currently held by the [`Session`]; failures are returned as [`ApiError`]
//! and never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::auth::{Session, authorization_value};
use crate::{log_api_request, log_api_result};
use super::asset::{AssetPayload, AssetType, KeyedPayload};
use super::error::ApiError;

/// Operations the console performs against the asset store
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Check a candidate token against the store without touching the session
    async fn probe(&self, token: &str) -> Result<(), ApiError>;

    /// Every asset of one type, in whatever order the store returns them
    async fn search(&self, asset_type: AssetType) -> Result<Vec<Value>, ApiError>;

    /// Create a new asset. Returns the store's copy of the record.
    async fn create(&self, payload: &AssetPayload) -> Result<Value, ApiError>;

    /// Replace an existing asset
    async fn update(&self, key: &str, payload: &AssetPayload) -> Result<Value, ApiError>;

    async fn remove(&self, asset_type: AssetType, key: &str) -> Result<(), ApiError>;
}

/// Search every asset of a type and decode it into a record.
///
/// Records that do not decode are logged and left out; the rest of the collection is kept.
pub async fn search_as<T: DeserializeOwned>(
    store: &dyn AssetStore,
    asset_type: AssetType,
) -> Result<Vec<T>, ApiError> {
    let records = store.search(asset_type).await?;
    Ok(records
        .into_iter()
        .filter_map(|v| {
            let key = v.get("@key").and_then(Value::as_str).unwrap_or("?").to_string();
            match serde_json::from_value(v) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(asset_type = %asset_type, key = %key, error = %e, "Skipping undecodable record");
                    None
                }
            }
        })
        .collect())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<Value>,
}

/// `reqwest` implementation of [`AssetStore`]
#[derive(Clone)]
pub struct AssetClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl AssetClient {
    pub fn new(
        base_url: &str,
        session: Session,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<String>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let authorization = match token {
            Some(t) => authorization_value(&t),
            None => self
                .session
                .authorization_header()
                .await
                .ok_or(ApiError::NotAuthenticated)?,
        };

        let mut request = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), store_message(&text)));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a human readable message out of an error body
fn store_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

/// The store answers a create either with the record or with a one-element array
fn first_record(value: Value) -> Value {
    match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    }
}

#[async_trait]
impl AssetStore for AssetClient {
    async fn probe(&self, token: &str) -> Result<(), ApiError> {
        log_api_request!("probe");
        let result = self
            .send(Method::GET, "/query/getHeader", Some(token.to_string()), None)
            .await
            .map(|_| ());
        log_api_result!("probe", result);
        result
    }

    async fn search(&self, asset_type: AssetType) -> Result<Vec<Value>, ApiError> {
        log_api_request!("search", asset_type = %asset_type);
        let body = json!({ "query": { "selector": { "@assetType": asset_type } } });
        let result = self
            .send(Method::POST, "/query/search", None, Some(body))
            .await
            .and_then(|v| {
                serde_json::from_value::<SearchResponse>(v)
                    .map(|r| r.result)
                    .map_err(|e| ApiError::Decode(e.to_string()))
            });
        if let Ok(records) = &result {
            tracing::debug!(asset_type = %asset_type, count = records.len(), "Search returned");
        }
        log_api_result!("search", result);
        result
    }

    async fn create(&self, payload: &AssetPayload) -> Result<Value, ApiError> {
        log_api_request!("create", asset_type = %payload.asset_type());
        let body = json!({ "asset": [payload] });
        let result = self
            .send(Method::POST, "/invoke/createAsset", None, Some(body))
            .await
            .map(first_record);
        log_api_result!("create", result);
        result
    }

    async fn update(&self, key: &str, payload: &AssetPayload) -> Result<Value, ApiError> {
        log_api_request!("update", asset_type = %payload.asset_type(), key);
        let keyed = KeyedPayload { key, payload };
        let body = json!({ "update": keyed });
        let result = self
            .send(Method::PUT, "/invoke/updateAsset", None, Some(body))
            .await;
        log_api_result!("update", result);
        result
    }

    async fn remove(&self, asset_type: AssetType, key: &str) -> Result<(), ApiError> {
        log_api_request!("remove", asset_type = %asset_type, key);
        let body = json!({ "key": { "@assetType": asset_type, "@key": key } });
        let result = self
            .send(Method::DELETE, "/invoke/deleteAsset", None, Some(body))
            .await
            .map(|_| ());
        log_api_result!("remove", result);
        result
    }
}
