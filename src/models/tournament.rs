//! Tournament and TournamentState.

use crate::models::player::{Player, PlayerId};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Players in every Super 8.
pub const PLAYERS_PER_TOURNAMENT: usize = 8;
/// Rounds in every Super 8.
pub const ROUNDS_PER_TOURNAMENT: u8 = 7;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("A Super 8 needs exactly {expected} players (got {actual})")]
    InvalidPlayerCount { expected: usize, actual: usize },

    #[error("Player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Invalid score {points_a} x {points_b}: each side must be 0-6 and the total 6")]
    InvalidScore { points_a: u8, points_b: u8 },

    #[error("Player name must not be blank")]
    BlankPlayerName,

    #[error("Tournament is finished")]
    TournamentFinished,

    #[error("Round {0} does not exist")]
    RoundNotFound(u8),

    #[error("Match index {0} does not exist (use 0 or 1)")]
    InvalidMatchIndex(usize),

    #[error("Already at the last round")]
    NoNextRound,

    #[error("Already at the first round")]
    NoPreviousRound,

    #[error("Tournament code must not be empty")]
    InvalidCode,
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Scores may be recorded and corrected.
    #[default]
    Active,
    /// Closed by the organizer; totals are frozen.
    Finished,
}

/// One Super 8: eight players, seven rounds, their results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Join code typed by players to enter the tournament.
    pub code: String,
    pub created_at: DateTime<Utc>,
    /// Roster in schedule order (position 1 first).
    pub(crate) players: Vec<Player>,
    pub(crate) rounds: Vec<Round>,
    /// 1-based round shown to the organizer.
    pub(crate) current_round: u8,
    pub(crate) state: TournamentState,
    /// Co-leaders at the maximum total; filled in when finished.
    pub(crate) winners: Vec<PlayerId>,
}

impl Tournament {
    pub fn is_finished(&self) -> bool {
        self.state == TournamentState::Finished
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn round(&self, number: u8) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub(crate) fn round_mut(&mut self, number: u8) -> Result<&mut Round, TournamentError> {
        self.rounds
            .iter_mut()
            .find(|r| r.number == number)
            .ok_or(TournamentError::RoundNotFound(number))
    }

    /// Round currently shown, if the schedule has been generated.
    pub fn current(&self) -> Option<&Round> {
        self.round(self.current_round)
    }

    /// Completed matches over all rounds.
    pub fn completed_matches(&self) -> usize {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .filter(|m| m.is_completed())
            .count()
    }

    /// Rounds with at least one completed match.
    pub fn rounds_played(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.matches.iter().any(|m| m.is_completed()))
            .count()
    }

    /// Advance to the next round (up to the last one).
    pub fn next_round(&mut self) -> Result<(), TournamentError> {
        if self.is_finished() {
            return Err(TournamentError::TournamentFinished);
        }
        if self.current_round >= ROUNDS_PER_TOURNAMENT {
            return Err(TournamentError::NoNextRound);
        }
        self.current_round += 1;
        Ok(())
    }

    /// Go back one round to review or correct it.
    pub fn previous_round(&mut self) -> Result<(), TournamentError> {
        if self.is_finished() {
            return Err(TournamentError::TournamentFinished);
        }
        if self.current_round <= 1 {
            return Err(TournamentError::NoPreviousRound);
        }
        self.current_round -= 1;
        Ok(())
    }
}
