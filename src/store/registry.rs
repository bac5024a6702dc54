//! Player registry: names known across tournaments, each with a stable id.
//!
//! Names are trimmed and compared case-insensitively, so "Ana" and " ana "
//! are the same player. Reusing the registered id is what lets the general
//! ranking follow a player from one tournament to the next.

use crate::models::{Player, PlayerId, TournamentError};
use crate::store::{PlayerRecord, StoreError, TournamentStore};
use serde::Deserialize;
use uuid::Uuid;

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn clean_name(name: &str) -> Result<&str, StoreError> {
    match name.trim() {
        "" => Err(TournamentError::BlankPlayerName.into()),
        trimmed => Ok(trimmed),
    }
}

/// Registered players sorted by name.
pub fn list_players<S>(store: &S) -> Result<Vec<PlayerRecord>, StoreError>
where
    S: TournamentStore + ?Sized,
{
    let mut players = store.players()?;
    players.sort_by_key(|p| p.name.to_lowercase());
    Ok(players)
}

/// Look a player up by name, ignoring case and surrounding spaces.
pub fn find_player<S>(store: &S, name: &str) -> Result<Option<PlayerRecord>, StoreError>
where
    S: TournamentStore + ?Sized,
{
    let name = name.trim();
    Ok(store.players()?.into_iter().find(|p| same_name(&p.name, name)))
}

/// Add a player to the registry, or return the existing one with that name.
pub fn register_player<S>(store: &mut S, name: &str) -> Result<PlayerRecord, StoreError>
where
    S: TournamentStore + ?Sized,
{
    let name = clean_name(name)?;
    if let Some(existing) = find_player(store, name)? {
        return Ok(existing);
    }
    let record = PlayerRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
    };
    store.save_player(&record)?;
    log::info!("Registered player {} ({})", record.name, record.id);
    Ok(record)
}

/// One roster slot as sent by a client: a name, and the id when already known.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub id: Option<PlayerId>,
    pub name: String,
}

impl RosterEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// A roster resolved against the registry.
#[derive(Clone, Debug)]
pub struct Roster {
    /// In the order given, ready for `start_tournament`.
    pub players: Vec<Player>,
    /// Not yet in the registry; saved by [`Roster::register`].
    pub new_players: Vec<PlayerRecord>,
}

impl Roster {
    /// Save the players the registry did not know yet.
    pub fn register<S>(&self, store: &mut S) -> Result<(), StoreError>
    where
        S: TournamentStore + ?Sized,
    {
        for record in &self.new_players {
            store.save_player(record)?;
            log::info!("Registered player {} ({})", record.name, record.id);
        }
        Ok(())
    }
}

/// Resolve roster entries to players without writing anything.
///
/// A registered id keeps its registered name. Otherwise the name decides:
/// a known name reuses its id, an unknown one becomes a new player (keeping
/// the id the client sent, if any). Repeated unknown names in one roster
/// resolve to the same new player.
pub fn roster_from_registry<S>(store: &S, entries: &[RosterEntry]) -> Result<Roster, StoreError>
where
    S: TournamentStore + ?Sized,
{
    let known = store.players()?;
    let mut new_players: Vec<PlayerRecord> = Vec::new();
    let mut players = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = clean_name(&entry.name)?;
        let existing = entry
            .id
            .and_then(|id| known.iter().find(|p| p.id == id))
            .or_else(|| {
                known
                    .iter()
                    .chain(new_players.iter())
                    .find(|p| same_name(&p.name, name))
            })
            .cloned();
        let record = match existing {
            Some(record) => record,
            None => {
                let record = PlayerRecord {
                    id: entry.id.unwrap_or_else(Uuid::new_v4),
                    name: name.to_string(),
                };
                new_players.push(record.clone());
                record
            }
        };
        players.push(Player::with_id(record.id, record.name));
    }
    Ok(Roster {
        players,
        new_players,
    })
}
