//! YAML-backed saved-player roster repository (`saved_players.yaml`).

use anyhow::{Context, Result};

use super::connection::FileConnection;
use crate::storage::traits::SavedPlayerStorage;

const SAVED_PLAYERS_FILE: &str = "saved_players.yaml";

#[derive(Clone)]
pub struct SavedPlayerRepository {
    connection: FileConnection,
}

impl SavedPlayerRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

impl SavedPlayerStorage for SavedPlayerRepository {
    fn load_saved_players(&self) -> Result<Vec<String>> {
        match self.connection.read_if_exists(SAVED_PLAYERS_FILE)? {
            Some(yaml) => {
                serde_yaml::from_str(&yaml).context("malformed saved_players.yaml")
            }
            None => Ok(Vec::new()),
        }
    }

    fn save_saved_players(&self, names: &[String]) -> Result<()> {
        let yaml = serde_yaml::to_string(names)?;
        self.connection.write_atomic(SAVED_PLAYERS_FILE, &yaml)?;
        Ok(())
    }
}
