use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque revision of a remote document (a blob SHA for the contents API).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer credential plus the repository it grants access to.
///
/// The token is never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl Credentials {
    /// Creates credentials, trimming surrounding whitespace.
    pub fn new(token: impl AsRef<str>, owner: impl AsRef<str>, repo: impl AsRef<str>) -> Self {
        Self {
            token: token.as_ref().trim().to_string(),
            owner: owner.as_ref().trim().to_string(),
            repo: repo.as_ref().trim().to_string(),
        }
    }

    /// True when every field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.owner.is_empty() && !self.repo.is_empty()
    }

    /// `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// Repository metadata returned by the credential probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// A document as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteDocument {
    pub path: String,
    /// Decoded text.
    pub content: String,
    pub version: VersionToken,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A conditional whole-document write.
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    pub path: &'a str,
    pub content: &'a str,
    /// Must match the store's current token or the write is rejected.
    pub version: &'a VersionToken,
    pub message: &'a str,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReceipt {
    /// Token to send with the next write.
    pub version: VersionToken,
    pub commit: Option<String>,
}
