//! Match results and point totals.
//!
//! Recording a score never touches player totals. Totals are always rebuilt
//! from the rounds by [`recompute_totals`], so corrections to past rounds
//! replace the old score instead of adding to it.

use crate::models::{
    GameMatch, Player, PlayerId, Round, Tournament, TournamentError, POINTS_PER_MATCH,
};
use serde::Serialize;
use std::collections::HashMap;

/// Check that a score is a valid split of the match points.
pub fn validate_score(points_a: u8, points_b: u8) -> Result<(), TournamentError> {
    let in_range = points_a <= POINTS_PER_MATCH && points_b <= POINTS_PER_MATCH;
    if !in_range || points_a + points_b != POINTS_PER_MATCH {
        return Err(TournamentError::InvalidScore { points_a, points_b });
    }
    Ok(())
}

fn match_mut(round: &mut Round, match_index: usize) -> Result<&mut GameMatch, TournamentError> {
    round
        .matches
        .get_mut(match_index)
        .ok_or(TournamentError::InvalidMatchIndex(match_index))
}

/// Record (or overwrite) the score of one match in a round.
///
/// On error the round is left exactly as it was.
pub fn record_result(
    round: &mut Round,
    match_index: usize,
    points_a: u8,
    points_b: u8,
) -> Result<(), TournamentError> {
    if let Err(e) = validate_score(points_a, points_b) {
        log::warn!(
            "Rejected score {} x {} for round {} match {}",
            points_a,
            points_b,
            round.number,
            match_index + 1
        );
        return Err(e);
    }
    let m = match_mut(round, match_index)?;
    m.points_a = Some(points_a);
    m.points_b = Some(points_b);
    log::debug!(
        "Round {} match {}: {} x {} (round completed: {})",
        round.number,
        match_index + 1,
        points_a,
        points_b,
        round.is_completed()
    );
    Ok(())
}

/// Remove the score of one match, putting it (and its round) back to pending.
pub fn clear_result(round: &mut Round, match_index: usize) -> Result<(), TournamentError> {
    match_mut(round, match_index)?.clear_result();
    Ok(())
}

/// Points per player summed over every completed match. Pure.
pub fn compute_totals(rounds: &[Round]) -> HashMap<PlayerId, u32> {
    let mut totals: HashMap<PlayerId, u32> = HashMap::new();
    for m in rounds.iter().flat_map(|r| r.matches.iter()) {
        let (Some(a), Some(b)) = (m.points_a, m.points_b) else {
            continue;
        };
        if !m.is_completed() {
            continue;
        }
        for id in m.pair_a.members() {
            *totals.entry(id).or_default() += u32::from(a);
        }
        for id in m.pair_b.members() {
            *totals.entry(id).or_default() += u32::from(b);
        }
    }
    totals
}

/// Reset every player's total and rebuild it from the completed matches.
///
/// Idempotent: calling it twice gives the same totals. A finished tournament
/// keeps the totals it was closed with.
pub fn recompute_totals(tournament: &mut Tournament) {
    if tournament.is_finished() {
        log::debug!("Tournament {} is finished; totals stay frozen", tournament.code);
        return;
    }
    let totals = compute_totals(&tournament.rounds);
    for p in &mut tournament.players {
        p.total_points = totals.get(&p.id).copied().unwrap_or(0);
    }
}

/// Row of the tournament ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based place in the sorted list.
    pub position: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub total_points: u32,
}

/// Players sorted by points, highest first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Standings {
    pub entries: Vec<Standing>,
}

impl Standings {
    /// All players sharing the highest total.
    pub fn leaders(&self) -> Vec<&Standing> {
        let Some(max) = self.entries.first().map(|s| s.total_points) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .take_while(|s| s.total_points == max)
            .collect()
    }

    /// The first `n` places (the top two are shown as the winning pair).
    pub fn top(&self, n: usize) -> &[Standing] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// First and second place have the same total; the caller decides the tie-break.
    pub fn has_tie_for_first(&self) -> bool {
        matches!(self.entries.as_slice(), [first, second, ..] if first.total_points == second.total_points)
    }
}

/// Rank players by their current totals. Equal totals keep roster order.
pub fn standings(tournament: &Tournament) -> Standings {
    let mut sorted: Vec<&Player> = tournament.players.iter().collect();
    sorted.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    let entries = sorted
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            position: i + 1,
            player_id: p.id,
            name: p.name.clone(),
            total_points: p.total_points,
        })
        .collect();
    Standings { entries }
}
