//! General ranking and statistics across finished tournaments.

use crate::models::{PlayerId, Tournament, TournamentId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Lifetime totals for one player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub tournaments_played: u32,
    pub total_points: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Statistics {
    pub tournaments_played: usize,
    pub rounds_played: usize,
    pub unique_players: usize,
}

/// Sum the per-tournament totals of every finished tournament.
///
/// Sorted by points (highest first), then by name. Active tournaments are ignored.
pub fn general_ranking(tournaments: &[Tournament]) -> Vec<RankingEntry> {
    let mut by_player: HashMap<PlayerId, RankingEntry> = HashMap::new();
    for t in tournaments.iter().filter(|t| t.is_finished()) {
        for p in &t.players {
            let entry = by_player.entry(p.id).or_insert_with(|| RankingEntry {
                player_id: p.id,
                name: p.name.clone(),
                tournaments_played: 0,
                total_points: 0,
            });
            entry.tournaments_played += 1;
            entry.total_points += p.total_points();
        }
    }
    let mut ranking: Vec<RankingEntry> = by_player.into_values().collect();
    ranking.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranking
}

pub fn statistics(tournaments: &[Tournament]) -> Statistics {
    let finished: Vec<&Tournament> = tournaments.iter().filter(|t| t.is_finished()).collect();
    let unique: HashSet<PlayerId> = finished
        .iter()
        .flat_map(|t| t.players.iter().map(|p| p.id))
        .collect();
    Statistics {
        tournaments_played: finished.len(),
        rounds_played: finished.iter().map(|t| t.rounds_played()).sum(),
        unique_players: unique.len(),
    }
}

/// One line of the tournament history list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub finished: bool,
    /// Rounds with at least one completed match.
    pub rounds_played: usize,
    pub completed_matches: usize,
    pub player_count: usize,
    /// Names of the co-leaders, empty while the tournament is active.
    pub winners: Vec<String>,
}

impl TournamentSummary {
    pub fn from_tournament(t: &Tournament) -> Self {
        let winners = t
            .winners
            .iter()
            .filter_map(|id| t.get_player(*id))
            .map(|p| p.name.clone())
            .collect();
        Self {
            id: t.id,
            code: t.code.clone(),
            created_at: t.created_at,
            finished: t.is_finished(),
            rounds_played: t.rounds_played(),
            completed_matches: t.completed_matches(),
            player_count: t.players.len(),
            winners,
        }
    }
}

/// Summaries, newest first. With `finished_only`, active tournaments are left out.
pub fn tournament_history(
    tournaments: &[Tournament],
    finished_only: bool,
) -> Vec<TournamentSummary> {
    let mut history: Vec<TournamentSummary> = tournaments
        .iter()
        .filter(|t| !finished_only || t.is_finished())
        .map(TournamentSummary::from_tournament)
        .collect();
    history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    history
}
