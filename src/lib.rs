//! Beach tennis Super 8 organizer: library with models, business logic and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod report;
pub mod store;

pub use logic::{
    clear_match_result, compute_totals, finish_tournament, general_ranking, generate_code,
    generate_rounds, generate_unique_code, recompute_totals, record_match_result, record_result,
    standings, start_tournament, statistics, tournament_history, validate_code, CodeValidation,
    RankingEntry, Standing, Standings, Statistics, TournamentSummary,
};
pub use models::{
    GameMatch, MatchState, Pair, Player, PlayerId, Round, RoundState, Tournament,
    TournamentError, TournamentId, TournamentState, PLAYERS_PER_TOURNAMENT,
    ROUNDS_PER_TOURNAMENT,
};
pub use store::{
    JsonFileStore, MemoryStore, PlayerRecord, StoreError, TournamentRecord, TournamentStore,
};
