//! Session values at the server boundary.
//!
//! The server holds no session table. Sessions arrive from the caller with
//! each guess and leave again inside the reply.

use hilo_engine::{Attempts, Evaluation, GameError, GameSession, Verdict};
use hilo_wire::{GameSessionProto, GuessReply, VerdictProto};

/// A successfully evaluated guess, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Player-facing feedback.
    pub message: String,
    /// Post-increment attempt count.
    pub attempts: Attempts,
    pub verdict: Verdict,
    /// Updated session the caller must send with its next guess.
    pub session: GameSession,
}

impl GuessOutcome {
    /// The `(message, attempts)` pair of the command contract.
    pub fn into_pair(self) -> (String, Attempts) {
        (self.message, self.attempts)
    }
}

impl From<Evaluation> for GuessOutcome {
    fn from(eval: Evaluation) -> Self {
        Self {
            message: eval.message(),
            attempts: eval.attempts(),
            verdict: eval.verdict,
            session: eval.session,
        }
    }
}

impl From<GuessOutcome> for GuessReply {
    fn from(outcome: GuessOutcome) -> Self {
        Self {
            message: outcome.message,
            attempts: outcome.attempts,
            verdict: VerdictProto::from(outcome.verdict) as i32,
            session: Some(outcome.session.into()),
        }
    }
}

/// Decode the session a caller sent with its guess.
///
/// An absent session is not an error here; the lifecycle reports it as
/// [`GameError::NoActiveSession`].
pub fn decode_session(proto: Option<GameSessionProto>) -> Result<Option<GameSession>, GameError> {
    proto
        .map(|p| GameSession::try_from(p).map_err(|reason| GameError::MalformedSession { reason }))
        .transpose()
}
