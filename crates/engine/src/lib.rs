//! Hilo Game Engine
//!
//! This crate contains the number-guessing game core: the session value,
//! guess evaluation and the session lifecycle.
//!
//! # Architecture Constraints
//!
//! The engine MUST NOT:
//! - Perform I/O operations (file, network, etc.)
//! - Hold session state between calls
//! - Use ambient randomness (targets come from an injected [`TargetSource`])
//!
//! Every operation is a pure function of the session value supplied by the
//! caller. The caller owns the authoritative copy of a [`GameSession`] and
//! hands it back on the next call.

#![deny(unsafe_code)]

pub mod error;
pub mod lifecycle;
pub mod target;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use error::GameError;
pub use lifecycle::{Phase, guess, start};
pub use target::{TARGET_SPAN, TargetSource, sample_target};

// ============================================================================
// Game Parameters
// ============================================================================

/// Smallest value a target (and a valid guess) can take.
pub const TARGET_MIN: u32 = 1;

/// Largest value a target (and a valid guess) can take.
pub const TARGET_MAX: u32 = 100;

/// Count of evaluated guesses within a session.
pub type Attempts = u32;

// ============================================================================
// Session
// ============================================================================

/// Lifecycle status carried by a session value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    /// Terminal: the target was found.
    Won,
}

/// One game instance: the hidden target, the attempt counter and the status.
///
/// Construction goes through [`GameSession::new`] or
/// [`GameSession::from_parts`], so a value of this type always has a target
/// in `[TARGET_MIN, TARGET_MAX]`. The target never changes once created; the
/// only way to obtain a session with more attempts is [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr", into = "SessionRepr")]
pub struct GameSession {
    target: u32,
    attempts: Attempts,
    status: SessionStatus,
}

impl GameSession {
    /// Create a fresh active session with zero attempts.
    pub fn new(target: u32) -> Result<Self, GameError> {
        Self::from_parts(target, 0, SessionStatus::Active)
    }

    /// Rebuild a session from caller-supplied parts.
    ///
    /// Session values round-trip through the caller and are untrusted on the
    /// way back in.
    pub fn from_parts(
        target: u32,
        attempts: Attempts,
        status: SessionStatus,
    ) -> Result<Self, GameError> {
        if !(TARGET_MIN..=TARGET_MAX).contains(&target) {
            return Err(GameError::MalformedSession {
                reason: "target outside 1..=100",
            });
        }
        if status == SessionStatus::Won && attempts == 0 {
            return Err(GameError::MalformedSession {
                reason: "won session without any attempts",
            });
        }
        Ok(Self {
            target,
            attempts,
            status,
        })
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn attempts(&self) -> Attempts {
        self.attempts
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == SessionStatus::Won
    }
}

/// Serialized form of a session. Field names match the command payload the
/// presentation layer already consumes.
#[derive(Serialize, Deserialize)]
struct SessionRepr {
    target_number: u32,
    attempts: Attempts,
    #[serde(default)]
    status: SessionStatus,
}

impl TryFrom<SessionRepr> for GameSession {
    type Error = GameError;

    fn try_from(repr: SessionRepr) -> Result<Self, Self::Error> {
        Self::from_parts(repr.target_number, repr.attempts, repr.status)
    }
}

impl From<GameSession> for SessionRepr {
    fn from(session: GameSession) -> Self {
        Self {
            target_number: session.target,
            attempts: session.attempts,
            status: session.status,
        }
    }
}

// ============================================================================
// Guess Evaluation
// ============================================================================

/// Outcome of comparing a guess with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    TooLow,
    TooHigh,
    Correct,
}

impl Verdict {
    /// Verdict for `guess.cmp(&target)`.
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::TooLow,
            Ordering::Greater => Self::TooHigh,
            Ordering::Equal => Self::Correct,
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }

    /// Player-facing feedback. `attempts` is the post-increment count.
    pub fn message(self, attempts: Attempts) -> String {
        match self {
            Self::TooLow => "Too low, try again".to_string(),
            Self::TooHigh => "Too high, try again".to_string(),
            Self::Correct => {
                format!("Congratulations! You guessed the number in {attempts} attempts")
            }
        }
    }
}

/// Result of a single evaluated guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// The session after this guess. Replaces the caller's copy.
    pub session: GameSession,
}

impl Evaluation {
    pub fn message(&self) -> String {
        self.verdict.message(self.session.attempts)
    }

    pub fn attempts(&self) -> Attempts {
        self.session.attempts
    }
}

/// Evaluate `guess` against `session`.
///
/// Increments the attempt counter by exactly one and moves the session to
/// [`SessionStatus::Won`] on a correct guess. The input session is taken by
/// value and left untouched; the updated one is returned.
///
/// Range checks on `guess` belong to the boundary layer. Any `u32` is
/// evaluated here.
///
/// # Errors
/// - [`GameError::SessionComplete`] if the session is already won
/// - [`GameError::MalformedSession`] if the attempt counter cannot advance
pub fn evaluate(session: GameSession, guess: u32) -> Result<Evaluation, GameError> {
    if session.is_won() {
        return Err(GameError::SessionComplete);
    }

    let attempts = session
        .attempts
        .checked_add(1)
        .ok_or(GameError::MalformedSession {
            reason: "attempt counter exhausted",
        })?;

    let verdict = Verdict::from_ordering(guess.cmp(&session.target));
    let status = if verdict.is_correct() {
        SessionStatus::Won
    } else {
        SessionStatus::Active
    };

    Ok(Evaluation {
        verdict,
        session: GameSession {
            target: session.target,
            attempts,
            status,
        },
    })
}

// ============================================================================
// Tests
// ============================================================================
