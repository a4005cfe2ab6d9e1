//! Guess validation for the server boundary.
//!
//! The engine evaluates any `u32`; this layer enforces that what reaches it is
//! a well-formed integer in `1..=100`. Rejections leave the session untouched.

use hilo_engine::{GameError, TARGET_MAX, TARGET_MIN};

/// Validate a guess taken from a decoded request.
///
/// `None` means the request carried no guess at all.
pub fn validate_guess(raw: Option<i64>) -> Result<u32, GameError> {
    match raw {
        Some(value) => check_guess(value),
        None => Err(GameError::invalid_guess("missing guess")),
    }
}

/// Validate a guess typed in as text.
pub fn parse_guess(text: &str) -> Result<u32, GameError> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| GameError::invalid_guess(format!("{trimmed:?} is not a whole number")))?;
    check_guess(value)
}

/// Range-check an integer guess.
pub fn check_guess(value: i64) -> Result<u32, GameError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (TARGET_MIN..=TARGET_MAX).contains(v))
        .ok_or_else(|| {
            GameError::invalid_guess(format!(
                "{value} is outside {TARGET_MIN}..={TARGET_MAX}"
            ))
        })
}
