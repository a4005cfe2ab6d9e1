//! Session lifecycle.
//!
//! The engine keeps no session table. A caller's phase is read off the
//! session value it holds: no value means it has not started a game yet.
//!
//! ```text
//! Uninitialized --start--> Active --guess(TooLow|TooHigh)--> Active
//!                          Active --guess(Correct)---------> Won
//! Won           --start--> Active
//! ```

use crate::{Evaluation, GameError, GameSession, SessionStatus, TargetSource, evaluate};

/// Lifecycle phase of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
    Won,
}

impl Phase {
    /// Phase of a caller holding `session`.
    pub fn of(session: Option<&GameSession>) -> Self {
        match session.map(GameSession::status) {
            None => Self::Uninitialized,
            Some(SessionStatus::Active) => Self::Active,
            Some(SessionStatus::Won) => Self::Won,
        }
    }
}

/// Start a new session with a target drawn from `source`.
///
/// Valid from any phase. Starting while a session is active abandons it.
///
/// # Errors
/// [`GameError::EntropyUnavailable`] if the source cannot produce a target.
pub fn start<S: TargetSource + ?Sized>(source: &S) -> Result<GameSession, GameError> {
    let target = source.draw_target()?;
    GameSession::new(target)
}

/// Submit `guess` for the caller holding `session`.
///
/// # Errors
/// - [`GameError::NoActiveSession`] when `session` is `None`
/// - [`GameError::SessionComplete`] when the session is already won
pub fn guess(session: Option<GameSession>, guess: u32) -> Result<Evaluation, GameError> {
    match session {
        None => Err(GameError::NoActiveSession),
        Some(session) => evaluate(session, guess),
    }
}
