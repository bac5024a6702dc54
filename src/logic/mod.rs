//! Tournament business logic: schedule, scoring, lifecycle, codes and rankings.

mod code;
mod play;
mod ranking;
mod schedule;
mod scoring;
mod setup;

pub use code::{
    generate_code, generate_unique_code, validate_code, CodeValidation, CODE_LENGTH,
    MAX_CODE_ATTEMPTS,
};
pub use play::{clear_match_result, finish_tournament, record_match_result};
pub use ranking::{
    general_ranking, statistics, tournament_history, RankingEntry, Statistics, TournamentSummary,
};
pub use schedule::{generate_rounds, schedule_positions, PositionMatch, PositionPair};
pub use scoring::{
    clear_result, compute_totals, recompute_totals, record_result, standings, validate_score,
    Standing, Standings,
};
pub use setup::start_tournament;
