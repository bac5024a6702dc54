//! Match (game) and Pair for 2v2 games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Points shared between the two pairs of every match.
pub const POINTS_PER_MATCH: u8 = 6;

/// Two players teamed together for one match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub first: PlayerId,
    pub second: PlayerId,
}

impl Pair {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self { first, second }
    }

    pub fn members(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }

    /// Same two players regardless of order.
    pub fn same_players(&self, other: &Pair) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

/// Whether a match has a valid result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Pending,
    Completed,
}

/// A single match: pair A against pair B.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub pair_a: Pair,
    pub pair_b: Pair,
    /// None until a result is recorded.
    pub points_a: Option<u8>,
    pub points_b: Option<u8>,
}

impl GameMatch {
    pub fn new(pair_a: Pair, pair_b: Pair) -> Self {
        Self {
            pair_a,
            pair_b,
            points_a: None,
            points_b: None,
        }
    }

    /// Completed iff both scores are present and split the match points.
    pub fn state(&self) -> MatchState {
        match (self.points_a, self.points_b) {
            (Some(a), Some(b))
                if a <= POINTS_PER_MATCH
                    && b <= POINTS_PER_MATCH
                    && u16::from(a) + u16::from(b) == u16::from(POINTS_PER_MATCH) =>
            {
                MatchState::Completed
            }
            _ => MatchState::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == MatchState::Completed
    }

    /// The four players on court: pair A first, then pair B.
    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.pair_a.first,
            self.pair_a.second,
            self.pair_b.first,
            self.pair_b.second,
        ]
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.pair_a.contains(id) || self.pair_b.contains(id)
    }

    /// Drop any recorded result (Completed -> Pending).
    pub fn clear_result(&mut self) {
        self.points_a = None;
        self.points_b = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_match() -> GameMatch {
        GameMatch::new(
            Pair::new(Uuid::new_v4(), Uuid::new_v4()),
            Pair::new(Uuid::new_v4(), Uuid::new_v4()),
        )
    }

    #[test]
    fn new_match_is_pending() {
        let m = sample_match();
        assert_eq!(m.state(), MatchState::Pending);
    }

    #[test]
    fn one_sided_score_is_pending() {
        let mut m = sample_match();
        m.points_a = Some(6);
        assert!(!m.is_completed());
    }

    #[test]
    fn clearing_returns_to_pending() {
        let mut m = sample_match();
        m.points_a = Some(2);
        m.points_b = Some(4);
        assert!(m.is_completed());
        m.clear_result();
        assert_eq!(m.state(), MatchState::Pending);
    }

    #[test]
    fn pair_equality_ignores_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(Pair::new(a, b).same_players(&Pair::new(b, a)));
        assert!(!Pair::new(a, b).same_players(&Pair::new(a, Uuid::new_v4())));
    }
}
