//! Active phase: score entry, corrections and closing the tournament.

use crate::logic::scoring::{clear_result, recompute_totals, record_result, standings};
use crate::models::{Tournament, TournamentError, TournamentState};

/// Record or correct a match score and refresh the players' totals.
///
/// Rejected on a finished tournament; nothing changes on error.
pub fn record_match_result(
    tournament: &mut Tournament,
    round_number: u8,
    match_index: usize,
    points_a: u8,
    points_b: u8,
) -> Result<(), TournamentError> {
    if tournament.is_finished() {
        return Err(TournamentError::TournamentFinished);
    }
    let round = tournament.round_mut(round_number)?;
    record_result(round, match_index, points_a, points_b)?;
    recompute_totals(tournament);
    Ok(())
}

/// Remove a match score and refresh the players' totals.
pub fn clear_match_result(
    tournament: &mut Tournament,
    round_number: u8,
    match_index: usize,
) -> Result<(), TournamentError> {
    if tournament.is_finished() {
        return Err(TournamentError::TournamentFinished);
    }
    let round = tournament.round_mut(round_number)?;
    clear_result(round, match_index)?;
    recompute_totals(tournament);
    Ok(())
}

/// Close the tournament: totals are rebuilt one last time, then frozen, and
/// every player tied at the top total is stored as a winner.
///
/// Rounds do not need to be complete.
pub fn finish_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.is_finished() {
        return Err(TournamentError::TournamentFinished);
    }
    recompute_totals(tournament);
    let ranking = standings(tournament);
    tournament.winners = ranking.leaders().iter().map(|s| s.player_id).collect();
    tournament.state = TournamentState::Finished;

    log::info!(
        "Finished tournament {} ({} completed matches, {} winner(s))",
        tournament.code,
        tournament.completed_matches(),
        tournament.winners.len()
    );
    Ok(())
}
