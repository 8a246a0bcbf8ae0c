//! Speaker proposal relay and the submission form workflow.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use seminar_core::submission::{
    relay_fields, validate_draft, AbstractStats, RelayMetadata, SubmissionDraft, SubmissionReport,
};

use crate::error::{ClientError, Result};

/// Destination for validated proposals.
#[async_trait]
pub trait ProposalRelay: Send + Sync {
    /// Posts form fields. Any 2xx is success.
    async fn send(&self, fields: &[(String, String)]) -> Result<()>;
}

/// HTTP client for a form-intake relay.
#[derive(Debug, Clone)]
pub struct FormRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl FormRelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// The relay's `error` text, or a generic message.
fn relay_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "Submission failed".to_string())
}

#[async_trait]
impl ProposalRelay for FormRelayClient {
    async fn send(&self, fields: &[(String, String)]) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Relay(relay_error_message(&body)))
    }
}

/// What happened to a submit attempt that did not hit a relay error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Blocked(SubmissionReport),
    /// The relay accepted the proposal.
    Sent(SubmissionReport),
}

/// The proposal form: owns the draft between submit attempts.
#[derive(Debug)]
pub struct SubmissionForm<R> {
    relay: R,
    meta: RelayMetadata,
    draft: SubmissionDraft,
}

impl<R: ProposalRelay> SubmissionForm<R> {
    pub fn new(relay: R, meta: RelayMetadata) -> Self {
        Self {
            relay,
            meta,
            draft: SubmissionDraft::default(),
        }
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubmissionDraft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: SubmissionDraft) {
        self.draft = draft;
    }

    /// Live counter for the abstract field.
    pub fn abstract_stats(&self) -> AbstractStats {
        AbstractStats::of(&self.draft.abstract_text)
    }

    pub fn check(&self) -> SubmissionReport {
        validate_draft(&self.draft)
    }

    /// Validates and relays the draft.
    ///
    /// The draft is cleared only when the relay accepts it; a blocked
    /// submission or a relay error leaves it untouched.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let report = self.check();
        if !report.is_submittable() {
            tracing::info!(errors = report.errors.len(), "Proposal blocked by validation");
            return Ok(SubmitOutcome::Blocked(report));
        }

        let fields = relay_fields(&self.draft, &self.meta);
        match self.relay.send(&fields).await {
            Ok(()) => {
                tracing::info!(title = %self.draft.title, "Proposal submitted");
                self.draft = SubmissionDraft::default();
                Ok(SubmitOutcome::Sent(report))
            }
            Err(error) => {
                tracing::warn!(%error, "Proposal relay failed");
                Err(error)
            }
        }
    }
}
