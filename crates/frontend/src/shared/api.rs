//! REST boundary of the list views

use async_trait::async_trait;
use contracts::shared::envelope::FetchEnvelope;
use contracts::shared::record::{Record, RecordId};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection failure, timeout or a 5xx answer
    #[error("network error: {0}")]
    Network(String),

    /// The server refused the payload (4xx)
    #[error("rejected by server (HTTP {status}): {body}")]
    Validation { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Network(format!("request timed out: {}", e))
        } else if e.is_connect() {
            ApiError::Network(format!("connection failed: {}", e))
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Record collections behind a REST endpoint. Payloads and responses
/// use the wire field names.
#[async_trait]
pub trait RecordApi: Send + Sync {
    async fn fetch_all(&self, endpoint: &str) -> Result<FetchEnvelope, ApiError>;

    /// Returns the canonical record with its server-assigned identifier
    async fn create(&self, endpoint: &str, payload: &Record) -> Result<Record, ApiError>;

    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Record) -> Result<Record, ApiError>;

    async fn delete(&self, endpoint: &str, id: &RecordId) -> Result<(), ApiError>;
}

/// [`RecordApi`] over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: Client,
    base_url: String,
}

impl HttpRecordApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{endpoint}`; the endpoint's trailing slash is kept
    pub fn collection_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// `{base}/{endpoint}/{id}` with the identifier percent-encoded
    pub fn item_url(&self, endpoint: &str, id: &RecordId) -> String {
        let collection = self.collection_url(endpoint);
        let encoded = urlencoding::encode(&id.to_string()).into_owned();
        if collection.ends_with('/') {
            format!("{}{}/", collection, encoded)
        } else {
            format!("{}/{}", collection, encoded)
        }
    }
}

/// Maps the status to an error, leaving successful responses untouched
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    if status.is_client_error() {
        ApiError::Validation {
            status: status.as_u16(),
            body,
        }
    } else {
        ApiError::Network(format!("HTTP {}: {}", status.as_u16(), body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn fetch_all(&self, endpoint: &str) -> Result<FetchEnvelope, ApiError> {
        let url = self.collection_url(endpoint);
        debug!(%url, "GET");
        let response = check_status(self.client.get(&url).send().await?).await?;
        decode(response).await
    }

    async fn create(&self, endpoint: &str, payload: &Record) -> Result<Record, ApiError> {
        let url = self.collection_url(endpoint);
        debug!(%url, "POST");
        let response = check_status(self.client.post(&url).json(payload).send().await?).await?;
        decode(response).await
    }

    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Record) -> Result<Record, ApiError> {
        let url = self.item_url(endpoint, id);
        debug!(%url, "PUT");
        let response = check_status(self.client.put(&url).json(payload).send().await?).await?;
        decode(response).await
    }

    async fn delete(&self, endpoint: &str, id: &RecordId) -> Result<(), ApiError> {
        let url = self.item_url(endpoint, id);
        debug!(%url, "DELETE");
        check_status(self.client.delete(&url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpRecordApi {
        HttpRecordApi::with_client(Client::new(), "http://localhost:8000/")
    }

    #[test]
    fn test_collection_url() {
        assert_eq!(api().base_url(), "http://localhost:8000");
        assert_eq!(
            api().collection_url("api/equipment/"),
            "http://localhost:8000/api/equipment/"
        );
        assert_eq!(
            api().collection_url("/api/equipment"),
            "http://localhost:8000/api/equipment"
        );
    }

    #[test]
    fn test_item_url_encodes_id() {
        assert_eq!(
            api().item_url("api/employees/", &RecordId::from("EMP 7/a")),
            "http://localhost:8000/api/employees/EMP%207%2Fa/"
        );
        assert_eq!(
            api().item_url("api/equipment", &RecordId::Int(12)),
            "http://localhost:8000/api/equipment/12"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, "{\"name\":[\"required\"]}".into()),
            ApiError::Validation {
                status: 400,
                body: "{\"name\":[\"required\"]}".into()
            }
        );
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, String::new()),
            ApiError::Network(_)
        ));
    }
}
