//! Saved-player roster service.
//!
//! A flat list of player names kept independently of any evening, used to
//! pre-populate the add-player affordance. Matching against evening players
//! is by name string only; there is no id relationship.

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::domain::error::LedgerError;
use crate::storage::{Connection, SavedPlayerStorage};

pub struct RosterService<C: Connection> {
    repository: C::SavedPlayerRepository,
    names: Vec<String>,
}

impl<C: Connection> RosterService<C> {
    pub fn new(connection: Arc<C>) -> Result<Self> {
        let repository = connection.create_saved_player_repository();
        let names = repository.load_saved_players()?;
        Ok(Self { repository, names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Replace the whole roster, e.g. from a snapshot import.
    pub fn replace(&mut self, names: Vec<String>) -> Result<(), LedgerError> {
        self.names = names;
        self.persist()
    }

    /// Add a name; empty or already-known names are silent no-ops.
    pub fn add_name(&mut self, name: &str) -> Result<(), LedgerError> {
        let name = name.trim();
        if name.is_empty() || self.names.iter().any(|n| n == name) {
            debug!("add_name: '{}' skipped", name);
            return Ok(());
        }
        self.names.push(name.to_string());
        self.persist()
    }

    /// Remove a name; no-op if absent.
    pub fn remove_name(&mut self, name: &str) -> Result<(), LedgerError> {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        if self.names.len() == before {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.repository
            .save_saved_players(&self.names)
            .map_err(|source| LedgerError::Storage {
                store: "saved players",
                source,
            })
    }
}
