//! Fixed Super 8 schedule: 7 rounds of 2 doubles matches built from roster positions.

use crate::models::{
    GameMatch, Pair, Player, Round, TournamentError, PLAYERS_PER_TOURNAMENT,
};
use std::collections::HashSet;

/// Two positions playing together.
pub type PositionPair = [usize; 2];
/// One match: pair A positions, pair B positions.
pub type PositionMatch = [PositionPair; 2];

/// 1-based roster positions for every round and match.
///
/// Every pair of positions plays together exactly once and against each
/// other exactly twice; every position plays in every round.
const SCHEDULE: [[PositionMatch; 2]; 7] = [
    [[[1, 5], [7, 8]], [[2, 3], [4, 6]]],
    [[[4, 7], [6, 8]], [[1, 2], [3, 5]]],
    [[[3, 4], [5, 7]], [[2, 6], [1, 8]]],
    [[[1, 6], [4, 5]], [[3, 7], [2, 8]]],
    [[[5, 6], [2, 7]], [[1, 4], [3, 8]]],
    [[[4, 8], [2, 5]], [[6, 7], [1, 3]]],
    [[[1, 7], [2, 4]], [[3, 6], [5, 8]]],
];

/// The position table used by [`generate_rounds`].
pub fn schedule_positions() -> &'static [[PositionMatch; 2]; 7] {
    &SCHEDULE
}

/// Build all rounds for an ordered roster of exactly 8 distinct players.
///
/// Pure and deterministic: the same roster order always yields the same pairings.
/// Nothing is returned unless the whole schedule can be built.
pub fn generate_rounds(players: &[Player]) -> Result<Vec<Round>, TournamentError> {
    if players.len() != PLAYERS_PER_TOURNAMENT {
        return Err(TournamentError::InvalidPlayerCount {
            expected: PLAYERS_PER_TOURNAMENT,
            actual: players.len(),
        });
    }
    let mut seen = HashSet::with_capacity(players.len());
    for p in players {
        if !seen.insert(p.id) {
            return Err(TournamentError::DuplicatePlayer(p.id));
        }
    }

    let pair_at = |[a, b]: PositionPair| Pair::new(players[a - 1].id, players[b - 1].id);

    let rounds: Vec<Round> = SCHEDULE
        .iter()
        .zip(1u8..)
        .map(|([first, second], number)| {
            Round::new(
                number,
                GameMatch::new(pair_at(first[0]), pair_at(first[1])),
                GameMatch::new(pair_at(second[0]), pair_at(second[1])),
            )
        })
        .collect();

    log::debug!("Generated {} rounds for {} players", rounds.len(), players.len());
    Ok(rounds)
}
