//! Data structures for the Super 8: players, pairs, matches, rounds, tournament state.

mod game;
mod player;
mod round;
mod tournament;

pub use game::{GameMatch, MatchState, Pair, POINTS_PER_MATCH};
pub use player::{Player, PlayerId};
pub use round::{Round, RoundState, MATCHES_PER_ROUND};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentState, PLAYERS_PER_TOURNAMENT,
    ROUNDS_PER_TOURNAMENT,
};
