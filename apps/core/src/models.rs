use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::evaluator::FeedbackReport;

/// Lifecycle status of a simulation session.
///
/// `Completed`, `Error` and `Blocked` are terminal: nothing in this crate moves a
/// session out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    Error,
    Blocked,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Idle,
        SessionStatus::Running,
        SessionStatus::Completed,
        SessionStatus::Error,
        SessionStatus::Blocked,
    ];

    /// Returns the wire label for the status
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Error => "error",
            SessionStatus::Blocked => "blocked",
        }
    }

    /// Whether a new message may be processed in this status.
    pub fn accepts_messages(&self) -> bool {
        match self {
            SessionStatus::Idle | SessionStatus::Running => true,
            SessionStatus::Completed | SessionStatus::Error | SessionStatus::Blocked => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Error | SessionStatus::Blocked
        )
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Idle, Running) | (Idle, Error) | (Running, Completed) | (Running, Error) | (Running, Blocked)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SessionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| AppError::Config(format!("Unknown session status: {:?}", s)))
    }
}

/// Author of a message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Represents a single message within a simulation session.
///
/// For `role = User`, `content` is always the sanitized form of what was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(content: String, role: MessageRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            role,
            timestamp: Utc::now(),
        }
    }
}

/// A single scenario-practice conversation owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSession {
    /// The unique identifier for the session (UUID).
    pub id: String,
    /// The owning user; an empty id is treated as unauthenticated.
    pub user_id: String,
    /// The scenario being practiced.
    pub scenario_id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulationSession {
    /// Starts a new idle session for `user_id` on `scenario_id`.
    pub fn new(user_id: impl Into<String>, scenario_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            scenario_id: scenario_id.into(),
            status: SessionStatus::Idle,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the session to `next`, rejecting moves outside the state machine.
    pub fn transition_to(&mut self, next: SessionStatus) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Appends a processed exchange and starts the session if it was idle.
    pub fn record_exchange(&mut self, reply: &SimulationReply) -> Result<(), AppError> {
        if !self.status.accepts_messages() {
            return Err(AppError::SessionState(self.status));
        }
        if self.status == SessionStatus::Idle {
            self.transition_to(SessionStatus::Running)?;
        }
        self.messages.push(reply.user_message.clone());
        self.messages.push(Message {
            id: Uuid::new_v4().to_string(),
            content: reply.content.clone(),
            role: reply.role,
            timestamp: reply.timestamp,
        });
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A file the user attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    /// Declared MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Leading bytes of the file, when available, for signature sniffing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: None,
        }
    }

    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = Some(bytes);
        self
    }
}

/// Displayed content paired with the raw input it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityCheck {
    pub content: String,
    pub original_content: String,
}

impl IntegrityCheck {
    pub fn new(content: impl Into<String>, original_content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            original_content: original_content.into(),
        }
    }
}

/// Reply envelope returned by `process_message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReply {
    /// Assistant reply text.
    pub content: String,
    /// Always `Assistant`.
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
    /// The sanitized user message that produced this reply.
    pub user_message: Message,
    /// Scores for the user message.
    pub feedback: FeedbackReport,
}
