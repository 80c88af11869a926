use crate::config::EvaluatorConfig;
use crate::error::AppError;
use crate::evaluator::FeedbackReport;
use crate::models::{
    FileUpload, IntegrityCheck, MessageRole, SessionStatus, SimulationSession,
};
use crate::simulator::{Responder, SimulatorService};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

// --- Mock Responders ---

struct FixedResponder(&'static str);

#[async_trait]
impl Responder for FixedResponder {
    async fn respond(
        &self,
        _session: &SimulationSession,
        _sanitized: &str,
        _feedback: &FeedbackReport,
    ) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

struct SlowResponder;

#[async_trait]
impl Responder for SlowResponder {
    async fn respond(
        &self,
        _session: &SimulationSession,
        _sanitized: &str,
        _feedback: &FeedbackReport,
    ) -> Result<String, AppError> {
        sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn respond(
        &self,
        _session: &SimulationSession,
        _sanitized: &str,
        _feedback: &FeedbackReport,
    ) -> Result<String, AppError> {
        Err(AppError::Responder("model offline".to_string()))
    }
}

/// Records what the responder was handed.
#[derive(Clone, Default)]
struct RecordingResponder {
    seen: Arc<Mutex<Vec<(String, u8)>>>,
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(
        &self,
        _session: &SimulationSession,
        sanitized: &str,
        feedback: &FeedbackReport,
    ) -> Result<String, AppError> {
        self.seen
            .lock()
            .unwrap()
            .push((sanitized.to_string(), feedback.scores.empathy));
        Ok("noted".to_string())
    }
}

// --- Helpers ---

fn active_session() -> SimulationSession {
    SimulationSession::new("u1", "angry-customer")
}

fn session_with(user_id: &str, status: SessionStatus) -> SimulationSession {
    let mut session = SimulationSession::new(user_id, "angry-customer");
    session.status = status;
    session
}

// --- process_message ---

#[tokio::test]
async fn test_empty_message_rejected() {
    let service = SimulatorService::default();
    let err = service
        .process_message(&active_session(), "", None)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::EmptyMessage);
}

#[tokio::test]
async fn test_too_long_message_rejected() {
    let service = SimulatorService::default();
    let err = service
        .process_message(&active_session(), &"a".repeat(1001), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::MessageTooLong {
            max: 1000,
            actual: 1001
        }
    );
}

#[tokio::test]
async fn test_error_session_rejected() {
    let service = SimulatorService::default();
    let err = service
        .process_message(&session_with("u1", SessionStatus::Error), "hi", None)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::SessionState(SessionStatus::Error));
    assert_eq!(err.to_string(), "Session is in error state");
}

#[tokio::test]
async fn test_missing_user_rejected() {
    let service = SimulatorService::default();
    let err = service
        .process_message(&session_with("", SessionStatus::Running), "hi", None)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Unauthorized);
}

#[tokio::test]
async fn test_evil_origin_rejected() {
    let service = SimulatorService::default();
    let err = service
        .process_message(&active_session(), "hi", Some("https://evil.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidOrigin(_)));
}

#[tokio::test]
async fn test_allowed_origin_resolves() {
    let service = SimulatorService::default();
    let reply = service
        .process_message(&active_session(), "hi", Some("http://localhost:3000"))
        .await
        .unwrap();
    assert_eq!(reply.role, MessageRole::Assistant);
    assert_eq!(reply.user_message.content, "hi");
}

#[tokio::test]
async fn test_script_stripped_before_reply() {
    let service = SimulatorService::default();
    let reply = service
        .process_message(&active_session(), "<script>alert(1)</script>Hello", None)
        .await
        .unwrap();
    assert!(!reply.content.contains("<script>"));
    assert!(reply.content.contains("Hello"));
}

#[tokio::test]
async fn test_sql_stripped_before_reply() {
    let service = SimulatorService::default();
    let reply = service
        .process_message(&active_session(), "Hello; DROP TABLE users;", None)
        .await
        .unwrap();
    assert!(!reply.content.contains("DROP TABLE"));
    assert!(reply.content.contains("Hello"));
}

#[tokio::test]
async fn test_responder_sees_only_sanitized_text() {
    let responder = RecordingResponder::default();
    let seen = responder.seen.clone();
    let service = SimulatorService::with_responder(EvaluatorConfig::default(), responder);

    let reply = service
        .process_message(
            &active_session(),
            "<b>I understand</b> how you feel<script>steal()</script>",
            None,
        )
        .await
        .unwrap();

    assert_eq!(reply.content, "noted");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "I understand how you feel");
    assert_eq!(seen[0].1, reply.feedback.scores.empathy);
}

#[tokio::test]
async fn test_rejected_message_never_reaches_responder() {
    let responder = RecordingResponder::default();
    let seen = responder.seen.clone();
    let service = SimulatorService::with_responder(EvaluatorConfig::default(), responder);

    let _ = service
        .process_message(&session_with("u1", SessionStatus::Completed), "hi", None)
        .await;
    let _ = service.process_message(&active_session(), "   ", None).await;

    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_reply_and_feedback() {
    let service = SimulatorService::with_responder(
        EvaluatorConfig::default(),
        FixedResponder("Why should I believe you?"),
    );
    let reply = service
        .process_message(
            &active_session(),
            "I understand how you feel. This sounds really difficult.",
            None,
        )
        .await
        .unwrap();
    assert_eq!(reply.content, "Why should I believe you?");
    assert!(reply.feedback.scores.empathy > 70);
}

#[tokio::test]
async fn test_responder_failure_propagates() {
    let service =
        SimulatorService::with_responder(EvaluatorConfig::default(), FailingResponder);
    let err = service
        .process_message(&active_session(), "hi", None)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Responder("model offline".to_string()));
}

#[tokio::test]
async fn test_slow_responder_times_out() {
    let config = EvaluatorConfig {
        responder_timeout_secs: 1,
        ..EvaluatorConfig::default()
    };
    let service = SimulatorService::with_responder(config, SlowResponder);
    let err = service
        .process_message(&active_session(), "hi", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Timeout(_)));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn test_configured_length_limit() {
    let config = EvaluatorConfig {
        max_message_length: 10,
        ..EvaluatorConfig::default()
    };
    let service = SimulatorService::new(config);
    assert!(service
        .process_message(&active_session(), "0123456789", None)
        .await
        .is_ok());
    assert!(matches!(
        service
            .process_message(&active_session(), "0123456789a", None)
            .await,
        Err(AppError::MessageTooLong { max: 10, actual: 11 })
    ));
}

#[tokio::test]
async fn test_record_exchange_starts_session() {
    let service = SimulatorService::default();
    let mut session = active_session();
    assert_eq!(session.status, SessionStatus::Idle);

    let reply = service
        .process_message(&session, "Let's start.", None)
        .await
        .unwrap();
    session.record_exchange(&reply).unwrap();

    assert_eq!(session.status, SessionStatus::Running);
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].role, MessageRole::User);
    assert_eq!(session.messages[1].role, MessageRole::Assistant);

    // Running sessions stay running
    let reply = service
        .process_message(&session, "Next step?", None)
        .await
        .unwrap();
    session.record_exchange(&reply).unwrap();
    assert_eq!(session.status, SessionStatus::Running);
    assert_eq!(session.messages.len(), 4);
}

#[tokio::test]
async fn test_record_exchange_rejects_finished_session() {
    let service = SimulatorService::default();
    let reply = service
        .process_message(&active_session(), "hello", None)
        .await
        .unwrap();

    let mut finished = session_with("u1", SessionStatus::Completed);
    assert_eq!(
        finished.record_exchange(&reply),
        Err(AppError::SessionState(SessionStatus::Completed))
    );
    assert!(finished.messages.is_empty());
}

#[tokio::test]
async fn test_reply_serializes_lowercase_role() {
    let service = SimulatorService::default();
    let reply = service
        .process_message(&active_session(), "hi", None)
        .await
        .unwrap();
    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["user_message"]["role"], "user");
    assert!(json["feedback"]["scores"]["empathy"].is_u64());
}

// --- process_file_upload ---

#[test]
fn test_file_uploads() {
    let service = SimulatorService::default();
    let session = active_session();

    assert!(service
        .process_file_upload(&session, &FileUpload::new("x.jpg", "image/jpeg"))
        .is_ok());
    assert!(matches!(
        service.process_file_upload(&session, &FileUpload::new("x.exe", "application/x-executable")),
        Err(AppError::InvalidFileType(_))
    ));
    assert!(matches!(
        service.process_file_upload(&session, &FileUpload::new("x.js", "application/javascript")),
        Err(AppError::InvalidFileType(_))
    ));
}

#[test]
fn test_file_upload_guarded() {
    let service = SimulatorService::default();
    let upload = FileUpload::new("x.pdf", "application/pdf");

    assert_eq!(
        service.process_file_upload(&session_with("", SessionStatus::Running), &upload),
        Err(AppError::Unauthorized)
    );
    assert_eq!(
        service.process_file_upload(&session_with("u1", SessionStatus::Error), &upload),
        Err(AppError::SessionState(SessionStatus::Error))
    );
}

#[test]
fn test_file_upload_signature_mismatch() {
    let service = SimulatorService::default();
    let upload = FileUpload::new("photo.png", "image/png").with_bytes(b"MZ\x90\x00\x03\x00".to_vec());
    assert!(matches!(
        service.process_file_upload(&active_session(), &upload),
        Err(AppError::InvalidFileType(_))
    ));
}

// --- validate_message_integrity ---

#[test]
fn test_message_integrity() {
    let service = SimulatorService::default();
    assert!(service
        .validate_message_integrity(&IntegrityCheck::new("Hello", "Hello"))
        .is_ok());
    assert_eq!(
        service.validate_message_integrity(&IntegrityCheck::new("Hello World", "Hello")),
        Err(AppError::Integrity)
    );
}

#[tokio::test]
async fn test_processed_message_passes_integrity() {
    let service = SimulatorService::default();
    let raw = "<i>Hello</i>; DROP TABLE users; <script>x()</script>";
    let reply = service
        .process_message(&active_session(), raw, None)
        .await
        .unwrap();
    assert!(service
        .validate_message_integrity(&IntegrityCheck::new(reply.user_message.content.clone(), raw))
        .is_ok());
}
