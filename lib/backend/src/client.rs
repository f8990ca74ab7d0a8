use crate::types::{Envelope, QueryMatch, QueryRequest};
use async_trait::async_trait;
use facetx_core::{Error, Result, UpsertRecord};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// A similarity-search index that can be queried and seeded.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one ranked query. No retries.
    async fn query(&self, request: QueryRequest) -> Result<Vec<QueryMatch>>;

    async fn upsert(&self, records: Vec<UpsertRecord>) -> Result<()>;
}

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub token: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "backend url must be http(s), got {:?}",
                self.url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("backend timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// JSON-over-HTTP client for a REST vector index.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        let envelope: serde_json::Result<Envelope<T>> = serde_json::from_slice(&bytes);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            return Err(Error::BackendError {
                status: status.as_u16(),
                message,
            });
        }

        match envelope {
            Ok(Envelope { result: Some(result), .. }) => Ok(result),
            Ok(Envelope { error: Some(message), .. }) => Err(Error::BackendError {
                status: status.as_u16(),
                message,
            }),
            Ok(_) => Err(Error::BackendError {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: "backend response has no result".to_string(),
            }),
            Err(e) => Err(Error::BackendError {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: format!("undecodable backend response: {}", e),
            }),
        }
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::BackendUnavailable(format!("request timed out: {}", e))
    } else if e.is_connect() {
        Error::BackendUnavailable(format!("connection failed: {}", e))
    } else if let Some(status) = e.status() {
        Error::BackendError {
            status: status.as_u16(),
            message: e.to_string(),
        }
    } else {
        Error::BackendUnavailable(e.to_string())
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn query(&self, request: QueryRequest) -> Result<Vec<QueryMatch>> {
        self.post("query", &request).await
    }

    async fn upsert(&self, records: Vec<UpsertRecord>) -> Result<()> {
        let _: serde_json::Value = self.post("upsert", &records).await?;
        Ok(())
    }
}
