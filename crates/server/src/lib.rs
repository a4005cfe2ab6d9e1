//! Hilo Server
//!
//! The server mediates between a caller (the presentation layer) and the game
//! engine. It owns:
//! - Guess validation
//! - Session decoding and encoding at the wire boundary
//! - The entropy source for new targets
//! - Request dispatch and structured logging
//!
//! # Architecture
//!
//! The server keeps no per-session state. Every call is a function of the
//! session value supplied by the caller, so one `Server` can be shared by
//! concurrent callers without locking. The only shared mutable resource is
//! the entropy source, which synchronizes itself.

#![deny(unsafe_code)]

pub mod entropy;
pub mod session;
pub mod validation;

use hilo_engine::{GameError, GameSession, TargetSource, lifecycle};
use hilo_wire::request::Command;
use hilo_wire::{ErrorReply, MakeGuess, Request, Response};
use prost::Message;
use thiserror::Error;
use tracing::{debug, info, warn};

use entropy::{OsTargetSource, SeededTargetSource};
pub use session::GuessOutcome;

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable holding an optional target seed.
pub const SEED_ENV_VAR: &str = "HILO_SEED";

/// Server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Seed for a reproducible target sequence. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned 64-bit integer, got {value:?}")]
    InvalidSeed { var: &'static str, value: String },
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let seed = match lookup(SEED_ENV_VAR) {
            None => None,
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_ENV_VAR,
                value,
            })?),
        };
        Ok(Self { seed })
    }
}

// ============================================================================
// Server
// ============================================================================

/// Stateless game server exposing `start_game` and `make_guess`.
pub struct Server {
    source: Box<dyn TargetSource>,
}

impl Server {
    /// Create a server with the source selected by `config`.
    pub fn new(config: ServerConfig) -> Self {
        match config.seed {
            Some(seed) => {
                info!(seed, rng = entropy::SEEDED_RNG_ALGORITHM, "using seeded targets");
                Self::with_source(SeededTargetSource::new(seed))
            }
            None => Self::with_source(OsTargetSource),
        }
    }

    /// Create a server drawing targets from `source`.
    pub fn with_source(source: impl TargetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Start a new session.
    ///
    /// # Errors
    /// [`GameError::EntropyUnavailable`] if no target can be drawn.
    pub fn start_game(&self) -> Result<GameSession, GameError> {
        let session = lifecycle::start(self.source.as_ref())
            .inspect_err(|e| warn!(error = %e, "start_game failed"))?;
        info!("session started");
        debug!(target_number = session.target(), "target drawn");
        Ok(session)
    }

    /// Evaluate `guess` against the caller's `session`.
    ///
    /// The guess is validated before the session is looked at, so an
    /// out-of-range guess is reported as [`GameError::InvalidGuess`] even
    /// without a session.
    ///
    /// # Errors
    /// - [`GameError::InvalidGuess`] if `guess` is outside `1..=100`
    /// - [`GameError::NoActiveSession`] if `session` is `None`
    /// - [`GameError::SessionComplete`] if the session is already won
    pub fn make_guess(
        &self,
        session: Option<GameSession>,
        guess: i64,
    ) -> Result<GuessOutcome, GameError> {
        let guess = validation::check_guess(guess)?;
        self.evaluate_guess(session, guess)
    }

    fn evaluate_guess(
        &self,
        session: Option<GameSession>,
        guess: u32,
    ) -> Result<GuessOutcome, GameError> {
        let eval = lifecycle::guess(session, guess)?;
        debug!(guess, verdict = ?eval.verdict, attempts = eval.attempts(), "guess evaluated");
        if eval.verdict.is_correct() {
            info!(attempts = eval.attempts(), "session won");
        }
        Ok(eval.into())
    }

    fn dispatch_guess(&self, msg: MakeGuess) -> Result<GuessOutcome, GameError> {
        let guess = validation::validate_guess(msg.guess)?;
        let session = session::decode_session(msg.session)?;
        self.evaluate_guess(session, guess)
    }

    /// Dispatch a decoded request.
    pub fn handle(&self, request: Request) -> Response {
        let id = request.request_id;
        let Some(command) = request.command else {
            warn!(request_id = id, "request without command");
            return Response::error(id, ErrorReply::malformed_request("request carries no command"));
        };

        let result = match command {
            Command::StartGame(_) => {
                debug!(request_id = id, "start_game");
                self.start_game().map(|s| Response::session(id, s))
            }
            Command::MakeGuess(msg) => {
                debug!(request_id = id, "make_guess");
                self.dispatch_guess(msg)
                    .map(|outcome| Response::guess(id, outcome.into()))
            }
        };

        result.unwrap_or_else(|e| {
            warn!(request_id = id, error = %e, "request rejected");
            Response::error(id, ErrorReply::from(&e))
        })
    }

    /// Decode, dispatch and encode one request.
    ///
    /// Bytes that do not decode to a `Request` yield a `MalformedRequest`
    /// error reply with request id 0.
    pub fn handle_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        let response = match Request::decode(bytes) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!(error = %e, len = bytes.len(), "undecodable request");
                Response::error(
                    0,
                    ErrorReply::malformed_request(format!("failed to decode request: {e}")),
                )
            }
        };
        response.encode_to_vec()
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
