//! Error kinds surfaced by the game core.

use thiserror::Error;

/// Every failure a session operation can report. None of them are retried
/// internally; retry is a caller decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The entropy source could not produce a target. Fatal to session start.
    #[error("entropy source unavailable: {reason}")]
    EntropyUnavailable { reason: String },

    /// The guess was absent, not an integer, or outside `1..=100`.
    #[error("invalid guess: {reason}")]
    InvalidGuess { reason: String },

    #[error("no active session, start a game first")]
    NoActiveSession,

    #[error("session already complete, start a new game")]
    SessionComplete,

    /// A caller-supplied session value breaks the session invariants.
    #[error("malformed session: {reason}")]
    MalformedSession { reason: &'static str },
}

impl GameError {
    pub fn invalid_guess(reason: impl Into<String>) -> Self {
        Self::InvalidGuess {
            reason: reason.into(),
        }
    }

    pub fn entropy_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::EntropyUnavailable {
            reason: reason.to_string(),
        }
    }
}
