//! Integration tests for schedule generation.

use beach_super8::{generate_rounds, Pair, Player, PlayerId, TournamentError};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn roster() -> Vec<Player> {
    (1..=8).map(|i| Player::new(format!("P{i}"))).collect()
}

fn unordered(pair: &Pair) -> (PlayerId, PlayerId) {
    (pair.first.min(pair.second), pair.first.max(pair.second))
}

#[test]
fn builds_seven_rounds_of_two_matches() {
    let rounds = generate_rounds(&roster()).unwrap();
    assert_eq!(rounds.len(), 7);
    for (i, round) in rounds.iter().enumerate() {
        assert_eq!(usize::from(round.number), i + 1);
        assert!(!round.is_completed());
        let on_court: HashSet<PlayerId> = round.matches.iter().flat_map(|m| m.players()).collect();
        assert_eq!(on_court.len(), 8, "round {} must use every player once", round.number);
    }
}

#[test]
fn every_pair_partners_exactly_once() {
    let players = roster();
    let rounds = generate_rounds(&players).unwrap();
    let mut partners = HashSet::new();
    for m in rounds.iter().flat_map(|r| r.matches.iter()) {
        for pair in [&m.pair_a, &m.pair_b] {
            assert!(
                partners.insert(unordered(pair)),
                "pair {:?} teamed up twice",
                pair
            );
        }
    }
    // 8 choose 2
    assert_eq!(partners.len(), 28);
}

#[test]
fn first_round_follows_position_table() {
    let players = roster();
    let id = |pos: usize| players[pos - 1].id;
    let rounds = generate_rounds(&players).unwrap();
    let first = &rounds[0];
    assert_eq!(first.matches[0].pair_a, Pair::new(id(1), id(5)));
    assert_eq!(first.matches[0].pair_b, Pair::new(id(7), id(8)));
    assert_eq!(first.matches[1].pair_a, Pair::new(id(2), id(3)));
    assert_eq!(first.matches[1].pair_b, Pair::new(id(4), id(6)));
}

#[test]
fn same_roster_gives_same_schedule() {
    let players = roster();
    assert_eq!(generate_rounds(&players).unwrap(), generate_rounds(&players).unwrap());

    let copy: Vec<Player> = players
        .iter()
        .map(|p| Player::with_id(p.id, p.name.clone()))
        .collect();
    assert_eq!(generate_rounds(&players).unwrap(), generate_rounds(&copy).unwrap());
}

#[test]
fn rejects_wrong_player_count() {
    let mut players = roster();
    players.pop();
    assert_eq!(
        generate_rounds(&players),
        Err(TournamentError::InvalidPlayerCount { expected: 8, actual: 7 })
    );
    assert!(matches!(
        generate_rounds(&[]),
        Err(TournamentError::InvalidPlayerCount { actual: 0, .. })
    ));
}

#[test]
fn rejects_duplicate_player() {
    let mut players = roster();
    players[7] = Player::with_id(players[2].id, "Copy");
    assert_eq!(
        generate_rounds(&players),
        Err(TournamentError::DuplicatePlayer(players[2].id))
    );
}
