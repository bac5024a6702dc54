//! Round: two matches played at the same time.

use crate::models::game::GameMatch;
use serde::{Deserialize, Serialize};

/// Matches played in every round.
pub const MATCHES_PER_ROUND: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// At least one match has no valid result.
    Pending,
    Completed,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub number: u8,
    pub matches: [GameMatch; MATCHES_PER_ROUND],
}

impl Round {
    pub fn new(number: u8, first: GameMatch, second: GameMatch) -> Self {
        Self {
            number,
            matches: [first, second],
        }
    }

    pub fn state(&self) -> RoundState {
        if self.matches.iter().all(GameMatch::is_completed) {
            RoundState::Completed
        } else {
            RoundState::Pending
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == RoundState::Completed
    }

    pub fn match_at(&self, index: usize) -> Option<&GameMatch> {
        self.matches.get(index)
    }
}
