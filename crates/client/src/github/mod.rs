//! Hosting contents API client.
//!
//! Implements [`DocumentStore`] over the GitHub REST contents endpoints:
//! repository probe, file read and conditional file update.

#[cfg(test)]
mod fake;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, LAST_MODIFIED, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};

use seminar_core::document::{
    decode_content, encode_content, error_message_from_body, status_to_store_error, Credentials,
    DocumentStore, RemoteDocument, RepoMetadata, Result, StoreError, VersionToken, WriteReceipt,
    WriteRequest,
};

const API_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("seminar-admin/", env!("CARGO_PKG_VERSION"));

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// HTTP client for the hosting contents API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct UpdateContentsRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpdateContentsResponse {
    content: ShaOnly,
    commit: Option<ShaOnly>,
}

#[derive(Debug, Deserialize)]
struct ShaOnly {
    sha: String,
}

impl GitHubClient {
    /// Create a new client with the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn contents_url(&self, credentials: &Credentials, path: &str) -> String {
        self.url(&format!(
            "/repos/{}/{}/contents/{}",
            credentials.owner,
            credentials.repo,
            path.trim_start_matches('/')
        ))
    }

    fn request(&self, method: Method, url: String, credentials: &Credentials) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&credentials.token)
            .header(ACCEPT, API_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    /// Turns a non-success response into a [`StoreError`].
    async fn check_status(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body);
        tracing::debug!(status = status.as_u16(), %path, %message, "Hosting API error");
        Err(status_to_store_error(status.as_u16(), path, message))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidContent(e.to_string()))
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn parse_last_modified(response: &reqwest::Response) -> Option<DateTime<Utc>> {
    response
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl DocumentStore for GitHubClient {
    async fn probe(&self, credentials: &Credentials) -> Result<RepoMetadata> {
        let url = self.url(&format!("/repos/{}/{}", credentials.owner, credentials.repo));
        let response = self
            .send(self.request(Method::GET, url, credentials))
            .await?;
        let response = self.check_status(response, &credentials.full_name()).await?;
        Self::parse_json(response).await
    }

    async fn read(&self, credentials: &Credentials, path: &str) -> Result<RemoteDocument> {
        let url = self.contents_url(credentials, path);
        let response = self
            .send(self.request(Method::GET, url, credentials))
            .await?;
        let response = self.check_status(response, path).await?;

        let last_modified = parse_last_modified(&response);
        let body: ContentsResponse = Self::parse_json(response).await?;

        Ok(RemoteDocument {
            path: path.to_string(),
            content: decode_content(&body.content)?,
            version: VersionToken::new(body.sha),
            size: body.size,
            last_modified,
        })
    }

    async fn write(
        &self,
        credentials: &Credentials,
        request: WriteRequest<'_>,
    ) -> Result<WriteReceipt> {
        let url = self.contents_url(credentials, request.path);
        let body = UpdateContentsRequest {
            message: request.message,
            content: encode_content(request.content),
            sha: request.version.as_str(),
        };
        let response = self
            .send(self.request(Method::PUT, url, credentials).json(&body))
            .await?;
        let response = self.check_status(response, request.path).await?;
        let body: UpdateContentsResponse = Self::parse_json(response).await?;

        Ok(WriteReceipt {
            version: VersionToken::new(body.content.sha),
            commit: body.commit.map(|c| c.sha),
        })
    }
}
