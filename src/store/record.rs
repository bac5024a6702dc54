//! Stored shape of a tournament and its replay into a live [`Tournament`].

use crate::logic::{finish_tournament, generate_rounds, recompute_totals, record_result};
use crate::models::{
    Pair, Player, PlayerId, Tournament, TournamentId, TournamentState, ROUNDS_PER_TOURNAMENT,
};
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
}

/// One match row: where it sits in the schedule, who played, the score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub round: u8,
    pub match_index: usize,
    pub pair_a: [PlayerId; 2],
    pub pair_b: [PlayerId; 2],
    pub points_a: Option<u8>,
    pub points_b: Option<u8>,
    pub finalized: bool,
}

/// What the persistence side keeps. Totals are never stored; they are rebuilt
/// by replaying the finalized matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: TournamentId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub finished: bool,
    #[serde(default = "default_current_round")]
    pub current_round: u8,
    /// Roster in schedule order.
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

fn default_current_round() -> u8 {
    1
}

impl TournamentRecord {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let matches = tournament
            .rounds
            .iter()
            .flat_map(|r| {
                r.matches.iter().enumerate().map(move |(i, m)| MatchRecord {
                    round: r.number,
                    match_index: i,
                    pair_a: m.pair_a.members(),
                    pair_b: m.pair_b.members(),
                    points_a: m.points_a,
                    points_b: m.points_b,
                    finalized: m.is_completed(),
                })
            })
            .collect();
        Self {
            id: tournament.id,
            code: tournament.code.clone(),
            created_at: tournament.created_at,
            finished: tournament.is_finished(),
            current_round: tournament.current_round,
            players: tournament
                .players
                .iter()
                .map(|p| PlayerRecord {
                    id: p.id,
                    name: p.name.clone(),
                })
                .collect(),
            matches,
        }
    }

    /// Rebuild the tournament: regenerate the schedule from the roster order,
    /// replay every finalized score, recompute totals, close it if it was closed.
    pub fn restore(&self) -> Result<Tournament, StoreError> {
        let players: Vec<Player> = self
            .players
            .iter()
            .map(|p| Player::with_id(p.id, p.name.clone()))
            .collect();
        let mut tournament = Tournament {
            id: self.id,
            code: self.code.clone(),
            created_at: self.created_at,
            rounds: generate_rounds(&players)?,
            players,
            current_round: self.current_round.clamp(1, ROUNDS_PER_TOURNAMENT),
            state: TournamentState::Active,
            winners: Vec::new(),
        };

        for rec in self.matches.iter().filter(|m| m.finalized) {
            let (Some(points_a), Some(points_b)) = (rec.points_a, rec.points_b) else {
                continue;
            };
            let mismatch = || StoreError::ScheduleMismatch {
                round: rec.round,
                match_index: rec.match_index,
            };
            let round = tournament.round_mut(rec.round).map_err(|_| mismatch())?;
            let scheduled = round.match_at(rec.match_index).ok_or_else(mismatch)?;
            let stored_a = Pair::new(rec.pair_a[0], rec.pair_a[1]);
            let stored_b = Pair::new(rec.pair_b[0], rec.pair_b[1]);
            if !scheduled.pair_a.same_players(&stored_a) || !scheduled.pair_b.same_players(&stored_b) {
                return Err(mismatch());
            }
            record_result(round, rec.match_index, points_a, points_b)?;
        }
        recompute_totals(&mut tournament);

        if self.finished {
            finish_tournament(&mut tournament)?;
        }
        log::debug!(
            "Restored tournament {} ({} completed matches)",
            tournament.code,
            tournament.completed_matches()
        );
        Ok(tournament)
    }
}
