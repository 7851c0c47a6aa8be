//! In-memory view state: form fields, loaded lists, the session token and
//! the operator-facing log. Nothing here is persisted.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

use crate::models::{
    AidRequest, AidRequestInput, Credentials, Donor, DonorInput, Volunteer, VolunteerInput,
    VolunteerTask,
};

/// Characters of the token shown in the header.
const TOKEN_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Newest-first log. Grows without bound for the life of the session.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    /// Every entry occupies exactly one line, whatever the server sent.
    fn push(&mut self, level: LogLevel, message: String) {
        let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
        self.entries.push_front(LogEntry {
            at: Local::now(),
            level,
            message,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Text form for a volunteer. Skills stay raw until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolunteerForm {
    pub name: String,
    pub skills: String,
}

impl VolunteerForm {
    pub fn to_input(&self) -> VolunteerInput {
        VolunteerInput {
            name: self.name.clone(),
            skills: parse_skills(&self.skills),
        }
    }
}

/// Split comma-separated skills, trimming each and dropping empty ones.
/// Duplicates and order are kept.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything the screen shows.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub credentials: Credentials,
    pub token: Option<String>,
    pub aid_form: AidRequestInput,
    pub aid_requests: Vec<AidRequest>,
    pub donor_form: DonorInput,
    pub donors: Vec<Donor>,
    pub volunteer_form: VolunteerForm,
    pub volunteers: Vec<Volunteer>,
    pub tasks: Vec<VolunteerTask>,
    pub task_title: String,
    pub assign_task_id: String,
    pub log: LogBuffer,
}

impl ViewState {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Short form of the token for display, e.g. `eyJhbGciOi...`.
    pub fn token_preview(&self) -> String {
        match self.token.as_deref() {
            Some(t) if !t.is_empty() => {
                let head: String = t.chars().take(TOKEN_PREVIEW_CHARS).collect();
                format!("{head}...")
            }
            _ => "(none)".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
