//! Target generation.
//!
//! The engine owns the sampling rule; where the random words come from is
//! decided by the host through [`TargetSource`].

use crate::{GameError, TARGET_MAX, TARGET_MIN};

/// Number of distinct target values.
pub const TARGET_SPAN: u32 = TARGET_MAX - TARGET_MIN + 1;

/// Words at or above this bound are rejected. It is the largest multiple of
/// [`TARGET_SPAN`] representable in a `u32`, so every residue is equally
/// likely among accepted words.
const ACCEPT_LIMIT: u32 = (u32::MAX / TARGET_SPAN) * TARGET_SPAN;

/// Supplies session targets.
///
/// Implementations are shared by concurrent callers, so draws take `&self`.
pub trait TargetSource: Send + Sync {
    /// Draw a target uniformly from `TARGET_MIN..=TARGET_MAX`.
    ///
    /// # Errors
    /// [`GameError::EntropyUnavailable`] if the underlying source fails.
    fn draw_target(&self) -> Result<u32, GameError>;
}

/// Map a stream of uniform 32-bit words onto `TARGET_MIN..=TARGET_MAX`
/// without modulo bias.
///
/// Words from the biased tail are discarded and the next word is drawn.
/// Errors from `next_word` are returned unchanged.
pub fn sample_target<E>(mut next_word: impl FnMut() -> Result<u32, E>) -> Result<u32, E> {
    loop {
        let word = next_word()?;
        if word < ACCEPT_LIMIT {
            return Ok(TARGET_MIN + word % TARGET_SPAN);
        }
    }
}
