//! Join codes: generation and validation before entering a tournament.

use rand::Rng;
use serde::Serialize;

const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_LENGTH: usize = 6;
/// Draws before giving up on finding a free code.
pub const MAX_CODE_ATTEMPTS: usize = 100;

/// Random code like `K7Q2ZB`.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())]))
        .collect()
}

/// Draw codes until `exists` reports one that is free.
///
/// Gives `Ok(None)` after [`MAX_CODE_ATTEMPTS`] taken codes. The first error
/// from `exists` stops the search.
pub fn generate_unique_code<R, F, E>(rng: &mut R, mut exists: F) -> Result<Option<String>, E>
where
    R: Rng,
    F: FnMut(&str) -> Result<bool, E>,
{
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_code(rng);
        if !exists(&code)? {
            log::debug!("Generated join code {}", code);
            return Ok(Some(code));
        }
    }
    log::warn!("No free join code after {} attempts", MAX_CODE_ATTEMPTS);
    Ok(None)
}

/// Outcome of checking a code typed by a player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeValidation {
    Empty,
    NotFound,
    /// The tournament exists but is closed and cannot be entered.
    Finished,
    Valid,
}

/// Classify a code. `lookup` returns `Some(is_finished)` for a known tournament.
pub fn validate_code<F>(code: &str, lookup: F) -> CodeValidation
where
    F: FnOnce(&str) -> Option<bool>,
{
    let code = code.trim();
    if code.is_empty() {
        return CodeValidation::Empty;
    }
    match lookup(code) {
        None => CodeValidation::NotFound,
        Some(true) => CodeValidation::Finished,
        Some(false) => CodeValidation::Valid,
    }
}
