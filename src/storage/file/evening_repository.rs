//! JSON-backed evening collection repository (`evenings.json`).
//!
//! JSON rather than YAML because the evening records nest maps inside lists
//! and the same shape travels in the export snapshot.

use anyhow::{Context, Result};
use log::debug;

use super::connection::FileConnection;
use crate::domain::models::Evening;
use crate::storage::traits::EveningStorage;

const EVENINGS_FILE: &str = "evenings.json";

#[derive(Clone)]
pub struct EveningRepository {
    connection: FileConnection,
}

impl EveningRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

impl EveningStorage for EveningRepository {
    fn load_evenings(&self) -> Result<Vec<Evening>> {
        match self.connection.read_if_exists(EVENINGS_FILE)? {
            Some(json) => {
                let evenings: Vec<Evening> =
                    serde_json::from_str(&json).context("malformed evenings.json")?;
                debug!("Loaded {} evenings", evenings.len());
                Ok(evenings)
            }
            None => Ok(Vec::new()),
        }
    }

    fn save_evenings(&self, evenings: &[Evening]) -> Result<()> {
        let json = serde_json::to_string_pretty(evenings)?;
        self.connection.write_atomic(EVENINGS_FILE, &json)?;
        debug!("Saved {} evenings", evenings.len());
        Ok(())
    }
}
