//! Message processing pipeline for simulation sessions.
//!
//! Every request goes through the session guard first, then sanitization,
//! then scoring, and only then reaches the [`Responder`] that produces the
//! assistant reply. The first failing step aborts the request.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::config::EvaluatorConfig;
use crate::error::AppError;
use crate::evaluator::{FeedbackReport, MessageEvaluator};
use crate::models::{FileUpload, IntegrityCheck, Message, MessageRole, SimulationReply, SimulationSession};
use crate::security::{sanitize, validate_file_type, validate_integrity};
use crate::session::SessionGuard;

/// Produces the assistant side of a simulated conversation.
///
/// Implementations typically call out to a generative model; they receive the
/// already sanitized user text and its scores.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    async fn respond(
        &self,
        session: &SimulationSession,
        sanitized: &str,
        feedback: &FeedbackReport,
    ) -> Result<String, AppError>;
}

/// Replies with the sanitized user text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(
        &self,
        _session: &SimulationSession,
        sanitized: &str,
        _feedback: &FeedbackReport,
    ) -> Result<String, AppError> {
        Ok(sanitized.to_string())
    }
}

/// Entry point for processing messages, uploads and integrity checks.
///
/// The service holds no per-session state; callers are expected to keep at
/// most one request in flight per session and to persist the returned reply
/// (see [`SimulationSession::record_exchange`]).
#[derive(Clone)]
pub struct SimulatorService<R: Responder = EchoResponder> {
    config: EvaluatorConfig,
    guard: SessionGuard,
    evaluator: MessageEvaluator,
    responder: Arc<R>,
}

impl SimulatorService<EchoResponder> {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self::with_responder(config, EchoResponder)
    }
}

impl Default for SimulatorService<EchoResponder> {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl<R: Responder> SimulatorService<R> {
    pub fn with_responder(config: EvaluatorConfig, responder: R) -> Self {
        Self {
            guard: SessionGuard::from_config(&config),
            evaluator: MessageEvaluator::new(),
            responder: Arc::new(responder),
            config,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// Validates, sanitizes and scores a user message and asks the responder
    /// for a reply.
    ///
    /// # Arguments
    ///
    /// * `session` - The session the message belongs to.
    /// * `content` - Raw user input.
    /// * `origin` - Origin or referrer of the request, if known.
    ///
    /// # Errors
    ///
    /// Guard errors (`Unauthorized`, `SessionState`, `InvalidOrigin`), then
    /// `EmptyMessage` / `MessageTooLong`, then `Responder` or `Timeout`.
    #[instrument(skip(self, session, content), fields(session_id = %session.id, chars = content.chars().count()))]
    pub async fn process_message(
        &self,
        session: &SimulationSession,
        content: &str,
        origin: Option<&str>,
    ) -> Result<SimulationReply, AppError> {
        self.guard.authorize(session, origin).map_err(|e| {
            warn!(kind = e.kind(), "Message rejected by session guard");
            e
        })?;

        let sanitized = sanitize(content, self.config.max_message_length)?;
        let feedback = self.evaluator.evaluate(&sanitized);

        let reply = timeout(
            self.config.responder_timeout(),
            self.responder.respond(session, &sanitized, &feedback),
        )
        .await??;

        info!(overall = feedback.overall, "Processed simulation message");

        Ok(SimulationReply {
            content: reply,
            role: MessageRole::Assistant,
            timestamp: Utc::now(),
            user_message: Message::new(sanitized, MessageRole::User),
            feedback,
        })
    }

    /// Checks that a file may be attached to the session.
    #[instrument(skip(self, session, file), fields(session_id = %session.id, file = %file.name))]
    pub fn process_file_upload(
        &self,
        session: &SimulationSession,
        file: &FileUpload,
    ) -> Result<(), AppError> {
        self.guard.authorize(session, None)?;
        validate_file_type(file).map_err(|e| {
            warn!(mime_type = %file.mime_type, "Upload rejected");
            e
        })
    }

    /// Confirms that displayed content is what sanitizing its original yields.
    #[instrument(skip_all)]
    pub fn validate_message_integrity(&self, message: &IntegrityCheck) -> Result<(), AppError> {
        validate_integrity(message)
    }
}
