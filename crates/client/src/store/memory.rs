//! In-memory document store behind the admin session tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use seminar_core::document::{
    Credentials, DocumentStore, RemoteDocument, RepoMetadata, Result, StoreError, VersionToken,
    WriteReceipt, WriteRequest,
};

#[derive(Debug, Clone)]
struct StoredDocument {
    content: String,
    version: VersionToken,
    modified_at: DateTime<Utc>,
}

/// In-memory document store.
///
/// Documents live in a HashMap wrapped in `Arc<RwLock<_>>`, so clones share
/// state. Every write mints a fresh version token and rejects stale ones
/// exactly like the hosting API.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    documents: Arc<RwLock<HashMap<String, StoredDocument>>>,
    token: String,
    latency: Duration,
}

impl InMemoryStore {
    /// Creates an empty store that accepts only `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            token: token.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delays every call, to exercise in-flight cancellation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Creates or replaces a document out of band, returning its new version.
    pub async fn put(&self, path: &str, content: impl Into<String>) -> VersionToken {
        let version = new_version();
        let mut documents = self.documents.write().await;
        documents.insert(
            path.to_string(),
            StoredDocument {
                content: content.into(),
                version: version.clone(),
                modified_at: Utc::now(),
            },
        );
        version
    }

    /// Current content of a document.
    pub async fn content(&self, path: &str) -> Option<String> {
        let documents = self.documents.read().await;
        documents.get(path).map(|d| d.content.clone())
    }

    /// Current version of a document.
    pub async fn version(&self, path: &str) -> Option<VersionToken> {
        let documents = self.documents.read().await;
        documents.get(path).map(|d| d.version.clone())
    }

    async fn authorize(&self, credentials: &Credentials) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if credentials.token == self.token {
            Ok(())
        } else {
            Err(StoreError::AuthFailure {
                status: 401,
                message: "Bad credentials".to_string(),
            })
        }
    }
}

fn new_version() -> VersionToken {
    VersionToken::new(Uuid::new_v4().simple().to_string())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn probe(&self, credentials: &Credentials) -> Result<RepoMetadata> {
        self.authorize(credentials).await?;
        Ok(RepoMetadata {
            full_name: credentials.full_name(),
            default_branch: Some("main".to_string()),
            private: true,
        })
    }

    async fn read(&self, credentials: &Credentials, path: &str) -> Result<RemoteDocument> {
        self.authorize(credentials).await?;
        let documents = self.documents.read().await;
        let document = documents.get(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_string(),
        })?;

        Ok(RemoteDocument {
            path: path.to_string(),
            content: document.content.clone(),
            version: document.version.clone(),
            size: document.content.len() as u64,
            last_modified: Some(document.modified_at),
        })
    }

    async fn write(
        &self,
        credentials: &Credentials,
        request: WriteRequest<'_>,
    ) -> Result<WriteReceipt> {
        self.authorize(credentials).await?;
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(request.path)
            .ok_or_else(|| StoreError::NotFound {
                path: request.path.to_string(),
            })?;

        if document.version != *request.version {
            return Err(StoreError::Conflict {
                path: request.path.to_string(),
                message: format!("{} does not match {}", request.path, request.version),
            });
        }

        document.content = request.content.to_string();
        document.version = new_version();
        document.modified_at = Utc::now();

        Ok(WriteReceipt {
            version: document.version.clone(),
            commit: Some(Uuid::new_v4().simple().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "data/schedule.json";

    fn credentials() -> Credentials {
        Credentials::new("secret", "weizmann", "seminar")
    }

    fn write_request<'a>(content: &'a str, version: &'a VersionToken) -> WriteRequest<'a> {
        WriteRequest {
            path: PATH,
            content,
            version,
            message: "update",
        }
    }

    #[tokio::test]
    async fn test_read_returns_current_version() {
        let store = InMemoryStore::new("secret");
        let version = store.put(PATH, "[]").await;

        let doc = store.read(&credentials(), PATH).await.unwrap();
        assert_eq!(doc.content, "[]");
        assert_eq!(doc.version, version);
        assert_eq!(doc.size, 2);
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let store = InMemoryStore::new("secret");
        let result = store.read(&credentials(), PATH).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_wrong_token_is_auth_failure() {
        let store = InMemoryStore::new("secret");
        store.put(PATH, "[]").await;
        let credentials = Credentials::new("guess", "weizmann", "seminar");

        assert!(matches!(
            store.probe(&credentials).await,
            Err(StoreError::AuthFailure { status: 401, .. })
        ));
        assert!(matches!(
            store.read(&credentials, PATH).await,
            Err(StoreError::AuthFailure { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_replaces_version() {
        let store = InMemoryStore::new("secret");
        let version = store.put(PATH, "[]").await;

        let receipt = store
            .write(&credentials(), write_request("[1]", &version))
            .await
            .unwrap();

        assert_ne!(receipt.version, version);
        assert_eq!(store.version(PATH).await, Some(receipt.version));
        assert_eq!(store.content(PATH).await.as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_second_write_with_old_version_conflicts() {
        let store = InMemoryStore::new("secret");
        let old = store.put(PATH, "[]").await;

        store
            .write(&credentials(), write_request("[1]", &old))
            .await
            .unwrap();
        let error = store
            .write(&credentials(), write_request("[2]", &old))
            .await
            .unwrap_err();

        assert!(error.is_conflict());
        assert_eq!(store.content(PATH).await.as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_clones_share_documents() {
        let store = InMemoryStore::new("secret");
        let other = store.clone();
        other.put(PATH, "[]").await;
        assert!(store.content(PATH).await.is_some());
    }
}
