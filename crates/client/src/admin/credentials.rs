use std::fmt;

use seminar_core::document::Credentials;

/// Session-scoped credential store.
///
/// Field edits write here and `connect` reads from here. Nothing is ever
/// written to disk, and `Debug` never shows the token.
#[derive(Clone, Default)]
pub struct CredentialCache {
    credentials: Credentials,
}

impl CredentialCache {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn set_token(&mut self, token: &str) {
        self.credentials.token = token.trim().to_string();
    }

    pub fn set_owner(&mut self, owner: &str) {
        self.credentials.owner = owner.trim().to_string();
    }

    pub fn set_repo(&mut self, repo: &str) {
        self.credentials.repo = repo.trim().to_string();
    }

    pub fn set(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn is_complete(&self) -> bool {
        self.credentials.is_complete()
    }
}

impl fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialCache")
            .field(&self.credentials)
            .finish()
    }
}
