//! Persistence port: where tournaments are kept between requests.
//!
//! The store is handed to whoever needs it; the library itself never reaches
//! for a global. Two implementations:
//! - [`MemoryStore`]: records in a map (tests, throwaway servers)
//! - [`JsonFileStore`]: one pretty-printed JSON file per join code
//!
//! Besides tournaments, a store keeps the player registry (see [`registry`]).

mod json_file;
mod memory;
mod record;
pub mod registry;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{MatchRecord, PlayerRecord, TournamentRecord};
pub use registry::{
    find_player, list_players, register_player, roster_from_registry, Roster, RosterEntry,
};

use crate::logic::{validate_code, CodeValidation};
use crate::models::{Tournament, TournamentError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving tournaments.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored tournament is invalid: {0}")]
    Tournament(#[from] TournamentError),

    #[error("Stored match {match_index} of round {round} does not match the schedule")]
    ScheduleMismatch { round: u8, match_index: usize },

    #[error("Code cannot be used as a storage key: {0}")]
    InvalidCode(String),

    #[error("Corrupt record file: {0}")]
    Corrupt(PathBuf),
}

/// Load/save collaborator for tournaments, keyed by join code.
pub trait TournamentStore {
    fn load(&self, code: &str) -> Result<Option<Tournament>, StoreError>;

    /// Insert or overwrite the tournament stored under its code.
    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// Every stored tournament, oldest first.
    fn list(&self) -> Result<Vec<Tournament>, StoreError>;

    fn exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.load(code)?.is_some())
    }

    /// Every registered player, in no particular order.
    fn players(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Insert a registry entry, or rename the one with the same id.
    fn save_player(&mut self, player: &PlayerRecord) -> Result<(), StoreError>;
}

/// Check a code typed by a player against the store.
pub fn validate_stored_code<S>(store: &S, code: &str) -> Result<CodeValidation, StoreError>
where
    S: TournamentStore + ?Sized,
{
    let found = match code.trim() {
        "" => None,
        trimmed => match store.load(trimmed) {
            Err(StoreError::InvalidCode(_)) => None,
            other => other?,
        },
    };
    Ok(validate_code(code, |_| found.map(|t| t.is_finished())))
}
