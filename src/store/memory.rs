use crate::models::Tournament;
use crate::store::{PlayerRecord, StoreError, TournamentRecord, TournamentStore};
use std::collections::HashMap;

/// In-memory store. Keeps records (not live tournaments) so loading goes
/// through the same replay as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, TournamentRecord>,
    players: Vec<PlayerRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TournamentStore for MemoryStore {
    fn load(&self, code: &str) -> Result<Option<Tournament>, StoreError> {
        self.records.get(code).map(TournamentRecord::restore).transpose()
    }

    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.records.insert(
            tournament.code.clone(),
            TournamentRecord::from_tournament(tournament),
        );
        Ok(())
    }

    fn list(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut all = self
            .records
            .values()
            .map(TournamentRecord::restore)
            .collect::<Result<Vec<_>, _>>()?;
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    fn exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.records.contains_key(code))
    }

    fn players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.players.clone())
    }

    fn save_player(&mut self, player: &PlayerRecord) -> Result<(), StoreError> {
        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => existing.name = player.name.clone(),
            None => self.players.push(player.clone()),
        }
        Ok(())
    }
}
