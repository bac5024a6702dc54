//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairs and lookups).
pub type PlayerId = Uuid;

/// A player in the tournament.
///
/// `total_points` is local to one tournament and derived from its recorded
/// matches; only the recomputation pass in `logic::scoring` writes it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub(crate) total_points: u32,
}

impl Player {
    /// Create a new player with the given name and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a player with a known id (e.g. reloaded from storage).
    pub fn with_id(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_points: 0,
        }
    }

    /// Points earned in the current tournament.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }
}
