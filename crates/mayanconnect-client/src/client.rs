//! Mayan EDMS HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;

use crate::config::{DEFAULT_TIMEOUT_SECS, MayanConfig};
use crate::source::{DEFAULT_CONTENT_TYPE, DocumentFile, DocumentSource};
use crate::{Error, Result};

/// Token-authenticated client for the Mayan document API.
#[derive(Clone)]
pub struct MayanClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MayanClient {
    /// Create a client for `base_url` (e.g. `http://mayan:8000/api/v4`) with the default timeout.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// Create a client from config. Fails if the URL or token is missing.
    pub fn from_config(config: &MayanConfig) -> Result<Self> {
        match (&config.api_url, &config.api_token) {
            (Some(url), Some(token)) if config.is_complete() => {
                Self::with_timeout(url, token, Duration::from_secs(config.timeout_secs))
            }
            _ => Err(Error::Config("Mayan API URL and token are required".to_string())),
        }
    }

    /// The base API URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }

    /// GET a JSON API endpoint.
    async fn get_json_endpoint(&self, url: &str) -> Result<reqwest::Response> {
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        Ok(response)
    }

    /// Resolve a download link from the document detail against the API base.
    ///
    /// Absolute URLs are used as-is; paths resolve against the API origin.
    fn resolve_download_url(&self, link: &str) -> Result<Url> {
        let resolved = if link.starts_with("http") {
            Url::parse(link)
        } else {
            Url::parse(&self.base_url).and_then(|base| base.join(link))
        };
        resolved.map_err(|e| Error::Decode(format!("invalid download URL '{link}': {e}")))
    }
}

async fn status_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    log::warn!("Mayan API error: {status} {body}");
    Error::Status { status, body }
}

fn header_or(
    response: &reqwest::Response,
    name: reqwest::header::HeaderName,
    default: String,
) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or(default)
}

#[async_trait]
impl DocumentSource for MayanClient {
    async fn list_documents(&self) -> Result<Value> {
        let response = self
            .get_json_endpoint(&format!("{}/documents/", self.base_url))
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    async fn get_document(&self, document_id: i64) -> Result<Value> {
        let response = self
            .get_json_endpoint(&format!(
                "{}/documents/{document_id}/?format=json",
                self.base_url
            ))
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn download_latest(&self, document_id: i64) -> Result<DocumentFile> {
        let response = self
            .get_json_endpoint(&format!(
                "{}/documents/{document_id}/?format=json",
                self.base_url
            ))
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let detail: Value = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;

        let link = detail
            .pointer("/latest_file/download_url")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingDownloadUrl)?;
        let url = self.resolve_download_url(link)?;

        log::debug!("Downloading document {document_id} from {url}");
        let file = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await?;

        if !file.status().is_success() {
            let status = file.status().as_u16();
            let body = file.text().await.unwrap_or_default();
            return Err(Error::DownloadStatus { status, body });
        }

        let content_type = header_or(&file, CONTENT_TYPE, DEFAULT_CONTENT_TYPE.to_string());
        let content_disposition = header_or(
            &file,
            CONTENT_DISPOSITION,
            DocumentFile::default_disposition(document_id),
        );
        let body = file.bytes().await?.to_vec();

        Ok(DocumentFile {
            content_type,
            content_disposition,
            body,
        })
    }
}

impl std::fmt::Debug for MayanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MayanClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
