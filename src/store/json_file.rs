use crate::models::Tournament;
use crate::store::{PlayerRecord, StoreError, TournamentRecord, TournamentStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Registry file, under its own subdirectory so no join code can clash with it.
const REGISTRY_FILE: &str = "registry/players.json";

/// One `<code>.json` file per tournament inside a data directory, plus the
/// player registry in `registry/players.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::info!("Using tournament data directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, code: &str) -> Result<PathBuf, StoreError> {
        let usable = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !usable {
            return Err(StoreError::InvalidCode(code.to_string()));
        }
        Ok(self.dir.join(format!("{code}.json")))
    }

    fn read_record(path: &Path) -> Result<TournamentRecord, StoreError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            StoreError::Corrupt(path.to_path_buf())
        })
    }

    fn write_atomic(path: &Path, content: String) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl TournamentStore for JsonFileStore {
    fn load(&self, code: &str) -> Result<Option<Tournament>, StoreError> {
        let path = self.path_for(code)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path)?.restore().map(Some)
    }

    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        let path = self.path_for(&tournament.code)?;
        let record = TournamentRecord::from_tournament(tournament);
        Self::write_atomic(&path, serde_json::to_string_pretty(&record)?)?;
        log::debug!("Saved tournament {} to {}", tournament.code, path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut all = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => all.push(record.restore()?),
                Err(StoreError::Corrupt(path)) => {
                    log::warn!("Skipping corrupt record {}", path.display());
                }
                Err(e) => return Err(e),
            }
        }
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    fn exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(code)?.exists())
    }

    fn players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let path = self.dir.join(REGISTRY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            StoreError::Corrupt(path)
        })
    }

    fn save_player(&mut self, player: &PlayerRecord) -> Result<(), StoreError> {
        let mut players = self.players()?;
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => existing.name = player.name.clone(),
            None => players.push(player.clone()),
        }
        let path = self.dir.join(REGISTRY_FILE);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::write_atomic(&path, serde_json::to_string_pretty(&players)?)?;
        log::debug!("Saved player {} to {}", player.name, path.display());
        Ok(())
    }
}
