use async_trait::async_trait;

use super::{Credentials, RemoteDocument, RepoMetadata, Result, WriteReceipt, WriteRequest};

/// A remote store of whole JSON documents with optimistic concurrency.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Checks the credentials by fetching repository metadata.
    async fn probe(&self, credentials: &Credentials) -> Result<RepoMetadata>;

    /// Reads a document and its current version token.
    async fn read(&self, credentials: &Credentials, path: &str) -> Result<RemoteDocument>;

    /// Replaces a document if `request.version` is still current.
    ///
    /// Fails with `StoreError::Conflict` when another writer got there first.
    /// Never retries.
    async fn write(
        &self,
        credentials: &Credentials,
        request: WriteRequest<'_>,
    ) -> Result<WriteReceipt>;
}
