use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use seminar_core::document::{
    self, DocumentStore, RemoteDocument, RepoMetadata, VersionToken, WriteReceipt, WriteRequest,
};
use seminar_core::event::{
    append_event_template, backup_file_name, default_commit_message, format_json, parse_json,
    sort_by_datetime, validate_schedule, EditError, ScheduleError,
};
use seminar_core::settings::SiteSettings;

use super::{AdminError, AdminState, CredentialCache, Result, StatusLog};
use crate::config::Config;

/// The document currently held by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    pub path: String,
    /// Token captured by the last successful read or save.
    pub version: VersionToken,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Result of checking the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCheck {
    /// Record validation, only for the event collection document.
    pub schedule: Option<std::result::Result<usize, ScheduleError>>,
}

impl BufferCheck {
    pub fn is_clean(&self) -> bool {
        !matches!(self.schedule, Some(Err(_)))
    }
}

/// A downloadable copy of the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backup {
    pub file_name: String,
    pub content: String,
}

/// One operator's editing session against a document store.
#[derive(Debug)]
pub struct AdminSession<S> {
    store: S,
    cache: CredentialCache,
    state: AdminState,
    repo: Option<RepoMetadata>,
    document: Option<LoadedDocument>,
    buffer: String,
    status: StatusLog,
    schedule_path: String,
    settings: SiteSettings,
}

async fn cancellable<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = document::Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AdminError::Cancelled),
        result = call => result.map_err(AdminError::from),
    }
}

impl<S: DocumentStore> AdminSession<S> {
    pub fn new(store: S, config: &Config, settings: SiteSettings) -> Self {
        Self {
            store,
            cache: CredentialCache::default(),
            state: AdminState::Disconnected,
            repo: None,
            document: None,
            buffer: String::new(),
            status: StatusLog::new(config.status_ttl()),
            schedule_path: config.schedule_path.clone(),
            settings,
        }
    }

    pub fn state(&self) -> AdminState {
        self.state
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    pub fn repo(&self) -> Option<&RepoMetadata> {
        self.repo.as_ref()
    }

    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.cache
    }

    /// Field edits go straight to the cache.
    pub fn credentials_mut(&mut self) -> &mut CredentialCache {
        &mut self.cache
    }

    /// True once a credential probe has succeeded.
    pub fn is_connected(&self) -> bool {
        self.repo.is_some()
    }

    /// True when the buffer has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.state == AdminState::Editing
    }

    fn fail(&mut self, context: &str, error: AdminError) -> AdminError {
        let text = if error.needs_reload() {
            format!("{context}: {error}. Reload the document and redo your edits")
        } else {
            format!("{context}: {error}")
        };
        self.status.error(text);
        error
    }

    pub async fn connect(&mut self) -> Result<RepoMetadata> {
        self.connect_with(&CancellationToken::new()).await
    }

    /// Probes the cached credentials. Only valid before a document is loaded.
    ///
    /// A buffer restored from a local file survives the probe and stays in
    /// `Editing`.
    pub async fn connect_with(&mut self, cancel: &CancellationToken) -> Result<RepoMetadata> {
        if self.document.is_some() {
            return Err(self.fail(
                "Connect failed",
                AdminError::InvalidState {
                    action: "connect",
                    state: self.state,
                },
            ));
        }
        if !self.cache.is_complete() {
            return Err(self.fail("Connect failed", AdminError::MissingCredentials));
        }

        let credentials = self.cache.credentials().clone();
        self.status
            .info(format!("Connecting to {}...", credentials.full_name()));

        let result = cancellable(cancel, self.store.probe(&credentials)).await;
        match result {
            Ok(repo) => {
                self.status.success(format!("Connected to {}", repo.full_name));
                self.repo = Some(repo.clone());
                if self.state != AdminState::Editing {
                    self.state = AdminState::Connected;
                }
                Ok(repo)
            }
            Err(AdminError::Cancelled) => Err(self.fail("Connect", AdminError::Cancelled)),
            Err(error) => {
                self.repo = None;
                if self.state != AdminState::Editing {
                    self.state = AdminState::Disconnected;
                }
                Err(self.fail("Connect failed", error))
            }
        }
    }

    /// Drops the connection, the document and the buffer. The credential
    /// cache is kept.
    pub fn disconnect(&mut self) {
        self.repo = None;
        self.document = None;
        self.buffer.clear();
        self.state = AdminState::Disconnected;
        self.status.info("Disconnected");
    }

    pub async fn load(&mut self, path: &str) -> Result<&LoadedDocument> {
        self.load_with(path, &CancellationToken::new()).await
    }

    /// Reads `path` into the buffer, discarding unsaved edits.
    ///
    /// On failure the session keeps its previous document and state.
    pub async fn load_with(
        &mut self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<&LoadedDocument> {
        if !self.is_connected() {
            return Err(self.fail("Load failed", AdminError::NotConnected));
        }

        let credentials = self.cache.credentials().clone();
        self.status.info(format!("Loading {path}..."));

        let result = cancellable(cancel, self.store.read(&credentials, path)).await;
        let remote: RemoteDocument = match result {
            Ok(remote) => remote,
            Err(error) => return Err(self.fail("Load failed", error)),
        };

        self.status
            .success(format!("Loaded {} ({} bytes)", remote.path, remote.size));
        self.buffer = remote.content;
        self.state = AdminState::Loaded;
        let document = self.document.insert(LoadedDocument {
            path: remote.path,
            version: remote.version,
            size: remote.size,
            last_modified: remote.last_modified,
        });
        Ok(&*document)
    }

    pub async fn reload(&mut self) -> Result<&LoadedDocument> {
        self.reload_with(&CancellationToken::new()).await
    }

    /// Re-reads the current document, the remedy for a save conflict.
    pub async fn reload_with(&mut self, cancel: &CancellationToken) -> Result<&LoadedDocument> {
        let Some(path) = self.document.as_ref().map(|d| d.path.clone()) else {
            return Err(self.fail("Reload failed", AdminError::NoDocument));
        };
        self.load_with(&path, cancel).await
    }

    fn require_document(&mut self, action: &str) -> Result<()> {
        if self.document.is_none() {
            return Err(self.fail(action, AdminError::NoDocument));
        }
        Ok(())
    }

    fn apply(
        &mut self,
        action: &str,
        edited: std::result::Result<String, EditError>,
    ) -> Result<()> {
        match edited {
            Ok(text) => {
                self.buffer = text;
                self.state = AdminState::Editing;
                Ok(())
            }
            Err(error) => Err(self.fail(action, error.into())),
        }
    }

    /// Replaces the buffer with operator-typed text.
    pub fn edit(&mut self, text: impl Into<String>) -> Result<()> {
        self.require_document("Edit failed")?;
        self.buffer = text.into();
        self.state = AdminState::Editing;
        Ok(())
    }

    /// Pretty-prints the buffer.
    pub fn format(&mut self) -> Result<()> {
        self.require_document("Format failed")?;
        let formatted = format_json(&self.buffer);
        self.apply("Format failed", formatted)?;
        self.status.success("JSON formatted");
        Ok(())
    }

    /// Sorts the event array by start time.
    pub fn sort(&mut self) -> Result<()> {
        self.require_document("Sort failed")?;
        let sorted = sort_by_datetime(&self.buffer);
        self.apply("Sort failed", sorted)?;
        self.status.success("Events sorted by date");
        Ok(())
    }

    /// Appends a placeholder event dated a week after `now`.
    pub fn add_event_template(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.require_document("Add event failed")?;
        let appended = append_event_template(&self.buffer, now, &self.settings);
        self.apply("Add event failed", appended)?;
        self.status.success("Event template added");
        Ok(())
    }

    /// Loads a local file's text into the buffer.
    ///
    /// Allowed in any state; the text must parse as JSON.
    pub fn restore(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if let Err(error) = parse_json(&text) {
            return Err(self.fail("Restore failed", error.into()));
        }
        self.buffer = text;
        self.state = AdminState::Editing;
        self.status.success("Content restored from file");
        Ok(())
    }

    /// Checks JSON syntax, and record rules for the event collection.
    pub fn validate(&mut self) -> Result<BufferCheck> {
        let value = match parse_json(&self.buffer) {
            Ok(value) => value,
            Err(error) => return Err(self.fail("Validation failed", error.into())),
        };

        let is_schedule = self
            .document
            .as_ref()
            .is_some_and(|d| d.path == self.schedule_path);
        let check = BufferCheck {
            schedule: is_schedule.then(|| validate_schedule(&value).map(|events| events.len())),
        };

        match &check.schedule {
            None => self.status.success("JSON is valid"),
            Some(Ok(count)) => self
                .status
                .success(format!("Schedule is valid ({count} events)")),
            Some(Err(error)) => self.status.warning(format!("Schedule has problems: {error}")),
        }
        Ok(check)
    }

    pub async fn save(&mut self, message: Option<&str>) -> Result<WriteReceipt> {
        self.save_with(message, &CancellationToken::new()).await
    }

    /// Writes the buffer back, conditioned on the captured version.
    ///
    /// Invalid JSON aborts before any remote call. Record validation
    /// problems in the event collection are reported but do not block.
    /// A conflict leaves the session in `Editing` with the buffer intact.
    pub async fn save_with(
        &mut self,
        message: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<WriteReceipt> {
        if !self.state.can_save() {
            return Err(self.fail(
                "Save failed",
                AdminError::InvalidState {
                    action: "save",
                    state: self.state,
                },
            ));
        }
        let Some(document) = self.document.clone() else {
            return Err(self.fail("Save failed", AdminError::NoDocument));
        };
        if self.repo.is_none() {
            return Err(self.fail("Save failed", AdminError::NotConnected));
        }

        let value = match parse_json(&self.buffer) {
            Ok(value) => value,
            Err(error) => return Err(self.fail("Save failed", error.into())),
        };
        if document.path == self.schedule_path {
            if let Err(error) = validate_schedule(&value) {
                self.status
                    .warning(format!("Saving despite schedule problems: {error}"));
            }
        }

        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_commit_message(&document.path));
        let credentials = self.cache.credentials().clone();

        self.state = AdminState::Saving;
        self.status.info(format!("Saving {}...", document.path));

        let request = WriteRequest {
            path: &document.path,
            content: &self.buffer,
            version: &document.version,
            message: &message,
        };
        let result = cancellable(cancel, self.store.write(&credentials, request)).await;

        match result {
            Ok(receipt) => {
                tracing::debug!(
                    path = %document.path,
                    version = %receipt.version,
                    "Version advanced"
                );
                if let Some(current) = self.document.as_mut() {
                    current.version = receipt.version.clone();
                    current.size = self.buffer.len() as u64;
                    current.last_modified = Some(Utc::now());
                }
                self.state = AdminState::Loaded;
                self.status.success(format!("Saved {}", document.path));
                Ok(receipt)
            }
            Err(error) => {
                self.state = AdminState::Editing;
                Err(self.fail("Save failed", error))
            }
        }
    }

    /// Copy of the buffer for download.
    pub fn backup(&mut self, today: NaiveDate) -> Result<Backup> {
        if self.buffer.trim().is_empty() {
            return Err(self.fail("Backup failed", AdminError::NothingToBackup));
        }
        let path = self.document.as_ref().map(|d| d.path.as_str());
        let backup = Backup {
            file_name: backup_file_name(path, today),
            content: self.buffer.clone(),
        };
        self.status.success(format!("Backup ready: {}", backup.file_name));
        Ok(backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use chrono::TimeZone;
    use seminar_core::document::{Credentials, StoreError};
    use serde_json::{json, Value};
    use std::time::Duration;

    const PATH: &str = "data/schedule.json";
    const TOKEN: &str = "secret";

    fn config() -> Config {
        Config {
            github_api_url: "http://unused".to_string(),
            schedule_path: PATH.to_string(),
            status_ttl_seconds: 5,
            relay_url: None,
            site_url: String::new(),
        }
    }

    fn schedule() -> String {
        serde_json::to_string_pretty(&json!([{
            "id": "e1",
            "title": "Emergence",
            "speakers": ["A"],
            "affiliation": "Weizmann",
            "datetime": "2099-01-01T10:00:00+02:00",
            "duration_min": 120,
            "level": "intro",
            "tags": ["x"],
            "abstract": "Abstract."
        }]))
        .unwrap()
    }

    fn session(store: &InMemoryStore) -> AdminSession<InMemoryStore> {
        let mut session = AdminSession::new(store.clone(), &config(), SiteSettings::default());
        session
            .credentials_mut()
            .set(Credentials::new(TOKEN, "weizmann", "seminar"));
        session
    }

    async fn loaded_session() -> (InMemoryStore, AdminSession<InMemoryStore>) {
        let store = InMemoryStore::new(TOKEN);
        store.put(PATH, schedule()).await;
        let mut session = session(&store);
        session.connect().await.unwrap();
        session.load(PATH).await.unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn test_connect_requires_credentials() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = AdminSession::new(store, &config(), SiteSettings::default());

        assert_eq!(
            session.connect().await.unwrap_err(),
            AdminError::MissingCredentials
        );
        assert_eq!(session.state(), AdminState::Disconnected);
        assert!(session.status().latest().unwrap().text.contains("required"));
    }

    #[tokio::test]
    async fn test_connect_with_bad_token_stays_disconnected() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = session(&store);
        session.credentials_mut().set_token("wrong");

        let error = session.connect().await.unwrap_err();
        assert!(matches!(
            error,
            AdminError::Store(StoreError::AuthFailure { .. })
        ));
        assert_eq!(session.state(), AdminState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_and_load() {
        let (_, session) = loaded_session().await;

        assert_eq!(session.state(), AdminState::Loaded);
        assert_eq!(session.repo().unwrap().full_name, "weizmann/seminar");
        assert_eq!(session.buffer(), schedule());
        assert_eq!(session.document().unwrap().path, PATH);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_load_requires_connection() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = session(&store);
        assert_eq!(
            session.load(PATH).await.unwrap_err(),
            AdminError::NotConnected
        );
    }

    #[tokio::test]
    async fn test_load_failure_keeps_state() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = session(&store);
        session.connect().await.unwrap();

        let error = session.load("data/missing.json").await.unwrap_err();
        assert!(matches!(error, AdminError::Store(StoreError::NotFound { .. })));
        assert_eq!(session.state(), AdminState::Connected);
        assert!(session.document().is_none());
    }

    #[tokio::test]
    async fn test_edits_enter_editing() {
        let (_, mut session) = loaded_session().await;

        session.sort().unwrap();
        assert_eq!(session.state(), AdminState::Editing);

        let now = Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap();
        session.add_event_template(now).unwrap();
        let value: Value = serde_json::from_str(session.buffer()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["id"], "2024-03-14-new-event");
    }

    #[tokio::test]
    async fn test_format_invalid_buffer_fails() {
        let (_, mut session) = loaded_session().await;
        session.edit("[{").unwrap();

        assert!(matches!(
            session.format().unwrap_err(),
            AdminError::InvalidJson(_)
        ));
        assert_eq!(session.buffer(), "[{");
    }

    #[tokio::test]
    async fn test_save_round_trip() {
        let (store, mut session) = loaded_session().await;
        let before = session.document().unwrap().version.clone();

        session.format().unwrap();
        let receipt = session.save(None).await.unwrap();

        assert_eq!(session.state(), AdminState::Loaded);
        assert_ne!(receipt.version, before);
        assert_eq!(session.document().unwrap().version, receipt.version);
        assert_eq!(store.version(PATH).await, Some(receipt.version));
        assert!(!session.state().can_save());
    }

    #[tokio::test]
    async fn test_consecutive_saves_use_latest_version() {
        let (store, mut session) = loaded_session().await;

        session.edit("[]").unwrap();
        session.save(Some("clear")).await.unwrap();
        session.edit("[1]").unwrap();
        session.save(Some("one")).await.unwrap();

        assert_eq!(store.content(PATH).await.as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_save_clean_buffer_is_rejected() {
        let (_, mut session) = loaded_session().await;
        assert_eq!(
            session.save(None).await.unwrap_err(),
            AdminError::InvalidState {
                action: "save",
                state: AdminState::Loaded
            }
        );
    }

    #[tokio::test]
    async fn test_save_invalid_json_stays_editing() {
        let (store, mut session) = loaded_session().await;
        session.edit("[{\"id\": ").unwrap();

        let error = session.save(None).await.unwrap_err();
        assert!(matches!(error, AdminError::InvalidJson(_)));
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(store.content(PATH).await, Some(schedule()));
    }

    #[tokio::test]
    async fn test_save_with_invalid_records_warns_but_writes() {
        let (store, mut session) = loaded_session().await;
        session.edit(r#"[{"id": "only-an-id"}]"#).unwrap();

        session.save(None).await.unwrap();

        assert_eq!(
            store.content(PATH).await.as_deref(),
            Some(r#"[{"id": "only-an-id"}]"#)
        );
        assert!(session
            .status()
            .history()
            .any(|m| m.text.starts_with("Saving despite schedule problems")));
    }

    #[tokio::test]
    async fn test_save_with_stale_version_conflicts() {
        let (store, mut session) = loaded_session().await;

        // Another writer updates the document after our read.
        store.put(PATH, "[]").await;

        session.edit("[1, 2]").unwrap();
        let error = session.save(Some("mine")).await.unwrap_err();

        assert!(error.needs_reload());
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(session.buffer(), "[1, 2]");
        assert_eq!(store.content(PATH).await.as_deref(), Some("[]"));
        assert!(session
            .status()
            .latest()
            .unwrap()
            .text
            .contains("Reload the document"));

        session.reload().await.unwrap();
        assert_eq!(session.buffer(), "[]");
        session.edit("[1, 2]").unwrap();
        session.save(Some("mine")).await.unwrap();
        assert_eq!(store.content(PATH).await.as_deref(), Some("[1, 2]"));
    }

    #[tokio::test]
    async fn test_cancelled_save_restores_editing() {
        let store = InMemoryStore::new(TOKEN).with_latency(Duration::from_millis(1));
        store.put(PATH, schedule()).await;
        let mut session = session(&store);
        session.connect().await.unwrap();
        session.load(PATH).await.unwrap();
        session.edit("[]").unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let error = session.save_with(None, &cancel).await.unwrap_err();

        assert_eq!(error, AdminError::Cancelled);
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(store.content(PATH).await, Some(schedule()));
    }

    #[tokio::test]
    async fn test_cancel_in_flight_load() {
        let store = InMemoryStore::new(TOKEN).with_latency(Duration::from_millis(50));
        store.put(PATH, schedule()).await;
        let mut session = session(&store);
        session.connect().await.unwrap();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            trigger.cancel();
        });

        let error = session.load_with(PATH, &cancel).await.unwrap_err();
        assert_eq!(error, AdminError::Cancelled);
        assert_eq!(session.state(), AdminState::Connected);
    }

    #[tokio::test]
    async fn test_restore_any_state() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = session(&store);

        assert!(matches!(
            session.restore("not json").unwrap_err(),
            AdminError::InvalidJson(_)
        ));
        assert_eq!(session.state(), AdminState::Disconnected);

        session.restore("[]").unwrap();
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(
            session.save(None).await.unwrap_err(),
            AdminError::NoDocument
        );
    }

    #[tokio::test]
    async fn test_restore_then_connect_load_and_save() {
        let store = InMemoryStore::new(TOKEN);
        store.put(PATH, schedule()).await;
        let mut session = session(&store);

        session.restore("[]").unwrap();
        assert!(!session.is_connected());
        assert_eq!(
            session.load(PATH).await.unwrap_err(),
            AdminError::NotConnected
        );

        session.connect().await.unwrap();
        assert!(session.is_connected());
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(session.buffer(), "[]");

        session.load(PATH).await.unwrap();
        assert_eq!(session.state(), AdminState::Loaded);
        session.restore("[]").unwrap();
        session.save(Some("restore")).await.unwrap();
        assert_eq!(session.state(), AdminState::Loaded);
        assert_eq!(store.content(PATH).await.as_deref(), Some("[]"));

        assert!(matches!(
            session.connect().await.unwrap_err(),
            AdminError::InvalidState { action: "connect", .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_connect_keeps_restored_buffer() {
        let store = InMemoryStore::new(TOKEN);
        let mut session = session(&store);
        session.credentials_mut().set_token("wrong");

        session.restore("[]").unwrap();
        assert!(session.connect().await.is_err());
        assert_eq!(session.state(), AdminState::Editing);
        assert_eq!(session.buffer(), "[]");
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_validate_reports_record_errors() {
        let (_, mut session) = loaded_session().await;
        assert_eq!(session.validate().unwrap().schedule, Some(Ok(1)));

        session
            .edit(r#"[{"id": "e1", "level": "expert"}]"#)
            .unwrap();
        let check = session.validate().unwrap();
        assert!(!check.is_clean());
        assert!(matches!(
            check.schedule,
            Some(Err(ScheduleError::InvalidRecords(_)))
        ));
    }

    #[tokio::test]
    async fn test_validate_other_document_checks_json_only() {
        let store = InMemoryStore::new(TOKEN);
        store.put("data/settings.json", r#"{"timezone": "UTC"}"#).await;
        let mut session = session(&store);
        session.connect().await.unwrap();
        session.load("data/settings.json").await.unwrap();

        let check = session.validate().unwrap();
        assert_eq!(check.schedule, None);
        assert!(check.is_clean());
    }

    #[tokio::test]
    async fn test_backup() {
        let (_, mut session) = loaded_session().await;
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();

        let backup = session.backup(today).unwrap();
        assert_eq!(backup.file_name, "backup-data-schedule.json-2024-03-14.json");
        assert_eq!(backup.content, schedule());

        let store = InMemoryStore::new(TOKEN);
        let mut empty = AdminSession::new(store, &config(), SiteSettings::default());
        assert_eq!(
            empty.backup(today).unwrap_err(),
            AdminError::NothingToBackup
        );
    }

    #[tokio::test]
    async fn test_connect_after_load_is_rejected() {
        let (_, mut session) = loaded_session().await;
        assert!(matches!(
            session.connect().await.unwrap_err(),
            AdminError::InvalidState { action: "connect", .. }
        ));

        session.disconnect();
        assert_eq!(session.state(), AdminState::Disconnected);
        assert!(session.buffer().is_empty());
        session.connect().await.unwrap();
    }
}
