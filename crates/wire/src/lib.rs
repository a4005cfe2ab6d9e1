//! Hilo Wire Protocol Types
//!
//! This crate defines the Protobuf messages exchanged between a caller (the
//! presentation layer) and the Hilo server. Both sides MUST depend on this
//! crate so the schema has a single definition.
//!
//! # Message Categories
//!
//! - **Requests**: `Request` envelope carrying `StartGame` or `MakeGuess`
//! - **Responses**: `Response` envelope carrying a session, a guess reply or
//!   an error reply
//!
//! The session value travels inside both directions: the server returns it and
//! the caller sends it back with its next guess. The target is therefore
//! visible to the caller.

#![deny(unsafe_code)]

use hilo_engine::{GameError, GameSession, SessionStatus, Verdict};
use prost::Message;

// ============================================================================
// Session
// ============================================================================

/// Lifecycle status on the wire.
///
/// `Unspecified` is the proto3 default and never valid in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SessionStatusProto {
    Unspecified = 0,
    Active = 1,
    Won = 2,
}

/// Caller-held session value.
#[derive(Clone, PartialEq, Message)]
pub struct GameSessionProto {
    /// Hidden target in 1..=100.
    #[prost(uint32, tag = "1")]
    pub target: u32,

    /// Guesses evaluated so far.
    #[prost(uint32, tag = "2")]
    pub attempts: u32,

    #[prost(enumeration = "SessionStatusProto", tag = "3")]
    pub status: i32,
}

// ============================================================================
// Requests
// ============================================================================

/// Start a new session.
#[derive(Clone, PartialEq, Message)]
pub struct StartGame {
    // No fields: every start draws a fresh target.
}

/// Submit a guess against a caller-held session.
#[derive(Clone, PartialEq, Message)]
pub struct MakeGuess {
    /// Session returned by the previous call. Absent before any start.
    #[prost(message, optional, tag = "1")]
    pub session: Option<GameSessionProto>,

    /// The guess. Signed so out-of-range values reach validation instead of
    /// failing to decode.
    #[prost(sint64, optional, tag = "2")]
    pub guess: Option<i64>,
}

/// Request envelope.
#[derive(Clone, PartialEq, Message)]
pub struct Request {
    /// Caller-chosen correlation id, echoed in the response.
    #[prost(uint64, tag = "1")]
    pub request_id: u64,

    #[prost(oneof = "request::Command", tags = "2, 3")]
    pub command: Option<request::Command>,
}

pub mod request {
    /// The two commands the server exposes.
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Command {
        #[prost(message, tag = "2")]
        StartGame(super::StartGame),
        #[prost(message, tag = "3")]
        MakeGuess(super::MakeGuess),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Verdict on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum VerdictProto {
    Unspecified = 0,
    TooLow = 1,
    TooHigh = 2,
    Correct = 3,
}

/// Reply to `MakeGuess`.
#[derive(Clone, PartialEq, Message)]
pub struct GuessReply {
    /// Player-facing feedback.
    #[prost(string, tag = "1")]
    pub message: String,

    /// Post-increment attempt count.
    #[prost(uint32, tag = "2")]
    pub attempts: u32,

    #[prost(enumeration = "VerdictProto", tag = "3")]
    pub verdict: i32,

    /// Updated session; replaces the caller's copy.
    #[prost(message, optional, tag = "4")]
    pub session: Option<GameSessionProto>,
}

/// Error kinds on the wire. One per `GameError` variant plus
/// `MalformedRequest` for envelopes that cannot be dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ErrorKindProto {
    Unspecified = 0,
    EntropyUnavailable = 1,
    InvalidGuess = 2,
    NoActiveSession = 3,
    SessionComplete = 4,
    MalformedSession = 5,
    MalformedRequest = 6,
}

/// Error reply.
#[derive(Clone, PartialEq, Message)]
pub struct ErrorReply {
    #[prost(enumeration = "ErrorKindProto", tag = "1")]
    pub kind: i32,

    /// Human-readable description, surfaced verbatim.
    #[prost(string, tag = "2")]
    pub message: String,
}

/// Response envelope.
#[derive(Clone, PartialEq, Message)]
pub struct Response {
    /// Echo of `Request::request_id`.
    #[prost(uint64, tag = "1")]
    pub request_id: u64,

    #[prost(oneof = "response::Result", tags = "2, 3, 4")]
    pub result: Option<response::Result>,
}

pub mod response {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Result {
        /// Reply to `StartGame`.
        #[prost(message, tag = "2")]
        Session(super::GameSessionProto),
        #[prost(message, tag = "3")]
        Guess(super::GuessReply),
        #[prost(message, tag = "4")]
        Error(super::ErrorReply),
    }
}

impl Response {
    pub fn session(request_id: u64, session: GameSession) -> Self {
        Self {
            request_id,
            result: Some(response::Result::Session(session.into())),
        }
    }

    pub fn guess(request_id: u64, reply: GuessReply) -> Self {
        Self {
            request_id,
            result: Some(response::Result::Guess(reply)),
        }
    }

    pub fn error(request_id: u64, reply: ErrorReply) -> Self {
        Self {
            request_id,
            result: Some(response::Result::Error(reply)),
        }
    }
}

impl ErrorReply {
    /// Reply for a request that could not be decoded or carries no command.
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKindProto::MalformedRequest as i32,
            message: message.into(),
        }
    }
}

// ============================================================================
// Conversion Traits
// ============================================================================

impl From<SessionStatus> for SessionStatusProto {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Active => Self::Active,
            SessionStatus::Won => Self::Won,
        }
    }
}

impl From<GameSession> for GameSessionProto {
    fn from(s: GameSession) -> Self {
        Self {
            target: s.target(),
            attempts: s.attempts(),
            status: SessionStatusProto::from(s.status()) as i32,
        }
    }
}

impl TryFrom<GameSessionProto> for GameSession {
    type Error = &'static str;

    fn try_from(p: GameSessionProto) -> Result<Self, Self::Error> {
        let status = match SessionStatusProto::try_from(p.status) {
            Ok(SessionStatusProto::Active) => SessionStatus::Active,
            Ok(SessionStatusProto::Won) => SessionStatus::Won,
            Ok(SessionStatusProto::Unspecified) => return Err("session status unspecified"),
            Err(_) => return Err("unknown session status"),
        };
        GameSession::from_parts(p.target, p.attempts, status).map_err(|e| match e {
            GameError::MalformedSession { reason } => reason,
            _ => "session rejected",
        })
    }
}

impl From<Verdict> for VerdictProto {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::TooLow => Self::TooLow,
            Verdict::TooHigh => Self::TooHigh,
            Verdict::Correct => Self::Correct,
        }
    }
}

impl From<&GameError> for ErrorKindProto {
    fn from(e: &GameError) -> Self {
        match e {
            GameError::EntropyUnavailable { .. } => Self::EntropyUnavailable,
            GameError::InvalidGuess { .. } => Self::InvalidGuess,
            GameError::NoActiveSession => Self::NoActiveSession,
            GameError::SessionComplete => Self::SessionComplete,
            GameError::MalformedSession { .. } => Self::MalformedSession,
        }
    }
}

impl From<&GameError> for ErrorReply {
    fn from(e: &GameError) -> Self {
        Self {
            kind: ErrorKindProto::from(e) as i32,
            message: e.to_string(),
        }
    }
}

/// Encode a message as a length-delimited frame for stream transports.
pub fn encode_frame<M: Message>(msg: &M) -> Vec<u8> {
    msg.encode_length_delimited_to_vec()
}

// ============================================================================
// Tests
// ============================================================================
