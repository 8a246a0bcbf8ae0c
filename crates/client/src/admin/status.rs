//! Timestamped, auto-dismissing status messages.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

const MAX_MESSAGES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One status line shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl StatusMessage {
    /// `HH:MM:SS: text` in local time.
    pub fn line(&self) -> String {
        format!("{}: {}", self.at.with_timezone(&Local).format("%H:%M:%S"), self.text)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line())
    }
}

/// Bounded log of status messages. Messages older than the TTL are no
/// longer active but stay in the history.
#[derive(Debug, Clone)]
pub struct StatusLog {
    ttl: Duration,
    messages: VecDeque<StatusMessage>,
}

impl StatusLog {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            messages: VecDeque::new(),
        }
    }

    /// Records a message now and mirrors it to tracing.
    pub fn push(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.push_at(level, text, Utc::now());
    }

    pub fn push_at(&mut self, level: StatusLevel, text: impl Into<String>, at: DateTime<Utc>) {
        let text = text.into();
        match level {
            StatusLevel::Info | StatusLevel::Success => tracing::info!("{text}"),
            StatusLevel::Warning => tracing::warn!("{text}"),
            StatusLevel::Error => tracing::error!("{text}"),
        }

        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(StatusMessage { level, text, at });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(StatusLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(StatusLevel::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(StatusLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(StatusLevel::Error, text);
    }

    /// Messages not yet dismissed at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| (now - m.at).to_std().map_or(true, |age| age < self.ttl))
            .collect()
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    pub fn history(&self) -> impl Iterator<Item = &StatusMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
