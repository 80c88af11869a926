//! SimCoach core: scoring and input hardening for a Hebrew/English
//! communication simulator.
//!
//! - `evaluator`: rule-based empathy, clarity and effectiveness scoring
//! - `security`: sanitization, integrity and upload type checks
//! - `session`: status, ownership and origin checks
//! - `simulator`: the request pipeline tying them together

pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod security;
pub mod session;
pub mod simulator;
pub mod telemetry;

pub use config::{EvaluatorConfig, LogFormat};
pub use error::AppError;
pub use evaluator::{
    calculate_clarity_score, calculate_effectiveness_score, calculate_empathy_score,
    FeedbackReport, FeedbackScore, MessageEvaluator,
};
pub use models::{
    FileUpload, IntegrityCheck, Message, MessageRole, SessionStatus, SimulationReply,
    SimulationSession,
};
pub use security::{sanitize, validate_file_type, validate_integrity};
pub use session::{
    can_user_continue_simulation, validate_simulation_status, validate_user_in_session,
    SessionGuard,
};
pub use simulator::{EchoResponder, Responder, SimulatorService};

#[cfg(test)]
mod tests;
