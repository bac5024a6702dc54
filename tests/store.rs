//! Integration tests for the persistence port: records, replay, memory and file stores.

use beach_super8::logic::CodeValidation;
use beach_super8::store::{
    find_player, list_players, register_player, roster_from_registry, validate_stored_code,
    MatchRecord, RosterEntry,
};
use beach_super8::{
    finish_tournament, general_ranking, record_match_result, start_tournament, JsonFileStore,
    MemoryStore, Player, StoreError, Tournament, TournamentError, TournamentRecord,
    TournamentStore,
};
use pretty_assertions::assert_eq;

fn played_tournament(code: &str) -> Tournament {
    let players: Vec<Player> = (1..=8).map(|i| Player::new(format!("P{i}"))).collect();
    let mut t = start_tournament(code, players).unwrap();
    record_match_result(&mut t, 1, 0, 6, 0).unwrap();
    record_match_result(&mut t, 1, 1, 3, 3).unwrap();
    record_match_result(&mut t, 2, 0, 1, 5).unwrap();
    t.next_round().unwrap();
    t
}

fn totals(t: &Tournament) -> Vec<u32> {
    t.players().iter().map(Player::total_points).collect()
}

#[test]
fn record_keeps_every_match_and_flags_finalized() {
    let t = played_tournament("REC");
    let record = TournamentRecord::from_tournament(&t);
    assert_eq!(record.matches.len(), 14);
    assert_eq!(record.matches.iter().filter(|m| m.finalized).count(), 3);
    assert_eq!(record.players.len(), 8);
    assert_eq!(record.current_round, 2);
    assert!(!record.finished);
}

#[test]
fn restore_replays_scores() {
    let t = played_tournament("REPLAY");
    let restored = TournamentRecord::from_tournament(&t).restore().unwrap();
    assert_eq!(restored.id, t.id);
    assert_eq!(restored.code, t.code);
    assert_eq!(restored.rounds(), t.rounds());
    assert_eq!(totals(&restored), totals(&t));
    assert_eq!(restored.current_round(), 2);
}

#[test]
fn restore_keeps_finished_state_and_winners() {
    let mut t = played_tournament("CLOSED");
    finish_tournament(&mut t).unwrap();
    let restored = TournamentRecord::from_tournament(&t).restore().unwrap();
    assert!(restored.is_finished());
    assert_eq!(restored.winners(), t.winners());
}

#[test]
fn restore_rejects_pairs_that_do_not_match_schedule() {
    let t = played_tournament("MISMATCH");
    let mut record = TournamentRecord::from_tournament(&t);
    let first = record.matches.iter_mut().find(|m| m.finalized).unwrap();
    first.pair_a.swap(0, 1); // order inside a pair does not matter
    assert!(record.restore().is_ok());

    let stranger = record.players[7].id;
    record.matches[0].pair_a[0] = stranger;
    assert!(matches!(
        record.restore(),
        Err(StoreError::ScheduleMismatch { round: 1, match_index: 0 })
    ));
}

#[test]
fn restore_rejects_invalid_stored_score() {
    let t = played_tournament("BADSCORE");
    let mut record = TournamentRecord::from_tournament(&t);
    let m: &mut MatchRecord = &mut record.matches[0];
    m.points_a = Some(5);
    m.points_b = Some(5);
    assert!(matches!(record.restore(), Err(StoreError::Tournament(_))));
}

#[test]
fn restore_ignores_unfinalized_rows() {
    let t = played_tournament("DRAFT");
    let mut record = TournamentRecord::from_tournament(&t);
    record.matches[2].finalized = false;
    let restored = record.restore().unwrap();
    assert_eq!(restored.completed_matches(), 2);
}

#[test]
fn memory_store_round_trips_and_validates_codes() {
    let mut store = MemoryStore::new();
    assert!(store.is_empty());
    let mut t = played_tournament("MEM1");
    store.save(&t).unwrap();

    let loaded = store.load("MEM1").unwrap().unwrap();
    assert_eq!(totals(&loaded), totals(&t));
    assert!(store.load("OTHER").unwrap().is_none());
    assert_eq!(validate_stored_code(&store, "MEM1").unwrap(), CodeValidation::Valid);
    assert_eq!(validate_stored_code(&store, "OTHER").unwrap(), CodeValidation::NotFound);
    assert_eq!(validate_stored_code(&store, "").unwrap(), CodeValidation::Empty);

    finish_tournament(&mut t).unwrap();
    store.save(&t).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(validate_stored_code(&store, "MEM1").unwrap(), CodeValidation::Finished);
}

#[test]
fn json_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let t = played_tournament("FILE1");
    {
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.save(&t).unwrap();
        store.save(&played_tournament("FILE2")).unwrap();
    }
    assert!(dir.path().join("FILE1.json").exists());

    let store = JsonFileStore::open(dir.path()).unwrap();
    let loaded = store.load("FILE1").unwrap().unwrap();
    assert_eq!(loaded.rounds(), t.rounds());
    assert_eq!(totals(&loaded), totals(&t));
    assert!(store.exists("FILE2").unwrap());
    assert!(!store.exists("FILE3").unwrap());
    assert_eq!(store.list().unwrap().len(), 2);
}

#[test]
fn json_file_store_rejects_path_like_codes() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(
        store.load("../escape"),
        Err(StoreError::InvalidCode(_))
    ));
    assert_eq!(
        validate_stored_code(&store, "../escape").unwrap(),
        CodeValidation::NotFound
    );
}

#[test]
fn json_file_store_reports_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("BROKEN.json"), "{ not json").unwrap();
    let mut store = JsonFileStore::open(dir.path()).unwrap();
    assert!(matches!(store.load("BROKEN"), Err(StoreError::Corrupt(_))));

    // Listing skips the broken file instead of failing the whole history.
    store.save(&played_tournament("GOOD")).unwrap();
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].code, "GOOD");
}

fn roster(names: &[&str]) -> Vec<RosterEntry> {
    names.iter().map(|n| RosterEntry::named(*n)).collect()
}

const NAMES: [&str; 8] = ["Ana", "Bia", "Caio", "Duda", "Edu", "Fabi", "Gus", "Hugo"];

#[test]
fn register_player_trims_and_ignores_case() {
    let mut store = MemoryStore::new();
    let ana = register_player(&mut store, "  Ana ").unwrap();
    assert_eq!(ana.name, "Ana");
    assert_eq!(register_player(&mut store, "ANA").unwrap(), ana);
    assert_eq!(find_player(&store, " ana").unwrap(), Some(ana.clone()));
    assert_eq!(find_player(&store, "Bia").unwrap(), None);
    assert!(matches!(
        register_player(&mut store, "   "),
        Err(StoreError::Tournament(TournamentError::BlankPlayerName))
    ));

    register_player(&mut store, "bruno").unwrap();
    let names: Vec<String> = list_players(&store).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Ana", "bruno"]);
}

#[test]
fn roster_reuses_registered_ids() {
    let mut store = MemoryStore::new();
    let ana = register_player(&mut store, "Ana").unwrap();

    let mut entries = roster(&NAMES);
    entries[0].name = "ana ".to_string();
    let resolved = roster_from_registry(&store, &entries).unwrap();
    assert_eq!(resolved.players[0].id, ana.id);
    assert_eq!(resolved.players[0].name, "Ana");
    assert_eq!(resolved.new_players.len(), 7);
    // Nothing is written until the roster is registered.
    assert_eq!(store.players().unwrap().len(), 1);

    resolved.register(&mut store).unwrap();
    assert_eq!(store.players().unwrap().len(), 8);
    let again = roster_from_registry(&store, &roster(&NAMES)).unwrap();
    assert!(again.new_players.is_empty());
    let ids = |r: &[Player]| r.iter().map(|p| p.id).collect::<Vec<_>>();
    assert_eq!(ids(&again.players), ids(&resolved.players));
}

#[test]
fn roster_rejects_blank_names_and_collapses_repeats() {
    let store = MemoryStore::new();
    let mut entries = roster(&NAMES);
    entries[5].name = " ".to_string();
    assert!(matches!(
        roster_from_registry(&store, &entries),
        Err(StoreError::Tournament(TournamentError::BlankPlayerName))
    ));

    entries[5].name = "ANA".to_string();
    let resolved = roster_from_registry(&store, &entries).unwrap();
    assert_eq!(resolved.players[5].id, resolved.players[0].id);
    assert!(matches!(
        start_tournament("TWICE", resolved.players),
        Err(TournamentError::DuplicatePlayer(_))
    ));
}

#[test]
fn registry_ids_carry_the_general_ranking_across_tournaments() {
    let mut store = MemoryStore::new();
    for code in ["WEEK1", "WEEK2"] {
        let resolved = roster_from_registry(&store, &roster(&NAMES)).unwrap();
        resolved.register(&mut store).unwrap();
        let mut t = start_tournament(code, resolved.players).unwrap();
        record_match_result(&mut t, 1, 0, 6, 0).unwrap();
        finish_tournament(&mut t).unwrap();
        store.save(&t).unwrap();
    }

    let ranking = general_ranking(&store.list().unwrap());
    assert_eq!(ranking.len(), 8);
    assert_eq!(ranking[0].name, "Ana");
    assert_eq!(ranking[0].total_points, 12);
    assert!(ranking.iter().all(|e| e.tournaments_played == 2));
}

#[test]
fn json_file_store_keeps_registry_apart_from_tournaments() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        register_player(&mut store, "Ana").unwrap();
        store.save(&played_tournament("REG")).unwrap();
    }
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert_eq!(find_player(&store, "ANA").unwrap().map(|p| p.name), Some("Ana".to_string()));
    assert_eq!(store.list().unwrap().len(), 1);
    assert!(!store.exists("players").unwrap());
}
