use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

use crate::config::EvaluatorConfig;
use crate::error::AppError;
use crate::models::{SessionStatus, SimulationSession};

/// True iff `status` is one of the lowercase session status names.
pub fn validate_simulation_status(status: &str) -> bool {
    status.parse::<SessionStatus>().is_ok()
}

/// Whether the session's status still allows new messages.
pub fn can_user_continue_simulation(session: &SimulationSession) -> bool {
    session.status.accepts_messages()
}

/// Strict ownership check; an empty `user_id` never matches a non-empty owner.
pub fn validate_user_in_session(session: &SimulationSession, user_id: &str) -> bool {
    session.user_id == user_id
}

/// Reduces an origin or referrer to its ASCII origin serialization.
fn origin_of(raw: &str) -> Result<String, AppError> {
    let url = Url::parse(raw.trim())?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(AppError::InvalidOrigin(raw.to_string()));
    }
    Ok(origin.ascii_serialization())
}

/// Gatekeeper run before any message or upload is processed.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    allowed_origins: HashSet<String>,
}

impl SessionGuard {
    /// Builds a guard from raw origin strings. Entries that do not parse are
    /// skipped with a warning.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_origins = origins
            .into_iter()
            .filter_map(|raw| match origin_of(raw.as_ref()) {
                Ok(origin) => Some(origin),
                Err(e) => {
                    warn!("Ignoring allowed origin {:?}: {}", raw.as_ref(), e);
                    None
                }
            })
            .collect();
        Self { allowed_origins }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(&config.allowed_origins)
    }

    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        origin_of(origin)
            .map(|origin| self.allowed_origins.contains(&origin))
            .unwrap_or(false)
    }

    /// Checks ownership, status and origin, in that order.
    ///
    /// A missing or blank `origin` skips the allow-list check. A referrer such
    /// as `http://localhost:3000/sim/42` is accepted when its origin is allowed.
    pub fn authorize(
        &self,
        session: &SimulationSession,
        origin: Option<&str>,
    ) -> Result<(), AppError> {
        if session.user_id.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }

        if !can_user_continue_simulation(session) {
            return Err(AppError::SessionState(session.status));
        }

        if let Some(raw) = origin.map(str::trim).filter(|o| !o.is_empty()) {
            let origin = origin_of(raw)?;
            if !self.allowed_origins.contains(&origin) {
                debug!(origin = %origin, "Rejected origin");
                return Err(AppError::InvalidOrigin(origin));
            }
        }

        Ok(())
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }
}
