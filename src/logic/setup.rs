//! Setup phase: create a tournament from a join code and an ordered roster.

use crate::logic::schedule::generate_rounds;
use crate::models::{Player, Tournament, TournamentError, TournamentState};
use chrono::Utc;
use uuid::Uuid;

/// Start a tournament: validate the roster, reset per-tournament totals and
/// generate the whole schedule at once.
pub fn start_tournament(
    code: impl Into<String>,
    players: Vec<Player>,
) -> Result<Tournament, TournamentError> {
    let code = code.into().trim().to_string();
    if code.is_empty() {
        return Err(TournamentError::InvalidCode);
    }
    // Totals carried in from another tournament never leak into this one.
    let players: Vec<Player> = players
        .into_iter()
        .map(|p| Player::with_id(p.id, p.name.trim()))
        .collect();
    if players.iter().any(|p| p.name.is_empty()) {
        return Err(TournamentError::BlankPlayerName);
    }
    let rounds = generate_rounds(&players)?;

    log::info!("Started tournament {} with {} players", code, players.len());
    Ok(Tournament {
        id: Uuid::new_v4(),
        code,
        created_at: Utc::now(),
        players,
        rounds,
        current_round: 1,
        state: TournamentState::Active,
        winners: Vec::new(),
    })
}
