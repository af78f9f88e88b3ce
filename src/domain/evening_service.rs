//! Evening service: owns the evening collection and all roster mutations.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::domain::error::LedgerError;
use crate::domain::models::{Evening, Player};
use crate::domain::parse::coerce_count;
use crate::storage::{Connection, EveningStorage};

/// Owns the evening collection. Every mutation re-persists the whole
/// collection and marks the touched evening as the current one; totals are
/// never stored, they are derived on demand via
/// [`crate::domain::settlement`].
pub struct EveningService<C: Connection> {
    repository: C::EveningRepository,
    evenings: Vec<Evening>,
    current_id: Option<String>,
}

impl<C: Connection> EveningService<C> {
    pub fn new(connection: Arc<C>) -> Result<Self> {
        let repository = connection.create_evening_repository();
        let evenings = repository.load_evenings()?;
        Ok(Self {
            repository,
            evenings,
            current_id: None,
        })
    }

    pub fn evenings(&self) -> &[Evening] {
        &self.evenings
    }

    pub fn evening(&self, evening_id: &str) -> Option<&Evening> {
        self.evenings.iter().find(|e| e.id == evening_id)
    }

    /// The most recently created or touched evening, falling back to the
    /// last one in the collection after a fresh load.
    pub fn current(&self) -> Option<&Evening> {
        self.current_id
            .as_deref()
            .and_then(|id| self.evening(id))
            .or_else(|| self.evenings.last())
    }

    /// Replace the whole collection, e.g. from a snapshot import.
    pub fn replace(&mut self, evenings: Vec<Evening>) -> Result<(), LedgerError> {
        self.evenings = evenings;
        self.current_id = None;
        self.persist()
    }

    /// Create a new empty evening; the date defaults to today.
    pub fn create_evening(&mut self, date: Option<NaiveDate>) -> Result<Evening, LedgerError> {
        let evening = Evening::new(date.unwrap_or_else(|| Local::now().date_naive()));
        info!("Created evening {} on {}", evening.id, evening.date);
        self.current_id = Some(evening.id.clone());
        self.evenings.push(evening.clone());
        self.persist()?;
        Ok(evening)
    }

    /// Remove an evening by id; no-op if absent.
    pub fn remove_evening(&mut self, evening_id: &str) -> Result<(), LedgerError> {
        let before = self.evenings.len();
        self.evenings.retain(|e| e.id != evening_id);
        if self.evenings.len() == before {
            debug!("remove_evening: no evening '{}', ignoring", evening_id);
            return Ok(());
        }
        if self.current_id.as_deref() == Some(evening_id) {
            self.current_id = None;
        }
        self.persist()
    }

    /// Append a new player to an evening's roster. Duplicate names are not
    /// rejected here; that check belongs to the calling layer.
    pub fn add_player(&mut self, evening_id: &str, name: &str) -> Result<Player, LedgerError> {
        let player = Player::new(name);
        let added = player.clone();
        self.mutate(evening_id, |evening| {
            evening.players.push(player);
        })?;
        Ok(added)
    }

    /// Remove a player from an evening by id; no-op if the player is absent.
    pub fn remove_player(&mut self, evening_id: &str, player_id: &str) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| {
            evening.players.retain(|p| p.id != player_id);
        })
    }

    pub fn rename_player(
        &mut self,
        evening_id: &str,
        player_id: &str,
        name: &str,
    ) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| {
            if let Some(player) = evening.player_mut(player_id) {
                player.name = name.to_string();
            }
        })
    }

    pub fn set_player_present(
        &mut self,
        evening_id: &str,
        player_id: &str,
        present: bool,
    ) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| {
            if let Some(player) = evening.player_mut(player_id) {
                player.present = present;
            }
        })
    }

    /// Set a player's occurrence count for a penalty from raw input.
    /// Negative or unparseable input coerces to zero; an unknown player is a
    /// silent no-op.
    pub fn set_penalty_count(
        &mut self,
        evening_id: &str,
        player_id: &str,
        penalty_id: &str,
        raw: &str,
    ) -> Result<(), LedgerError> {
        let count = coerce_count(raw);
        self.mutate(evening_id, |evening| {
            match evening.player_mut(player_id) {
                Some(player) => {
                    player.penalty_counts.insert(penalty_id.to_string(), count);
                }
                None => debug!("set_penalty_count: no player '{}', ignoring", player_id),
            }
        })
    }

    /// Store a game result verbatim; results are display-only free text.
    pub fn set_game_result(
        &mut self,
        evening_id: &str,
        player_id: &str,
        game_type_id: &str,
        value: &str,
    ) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| {
            match evening.player_mut(player_id) {
                Some(player) => {
                    player
                        .game_results
                        .insert(game_type_id.to_string(), value.to_string());
                }
                None => debug!("set_game_result: no player '{}', ignoring", player_id),
            }
        })
    }

    pub fn set_date(&mut self, evening_id: &str, date: NaiveDate) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| evening.date = date)
    }

    pub fn set_notes(&mut self, evening_id: &str, notes: &str) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| evening.notes = notes.to_string())
    }

    pub fn set_closed(&mut self, evening_id: &str, closed: bool) -> Result<(), LedgerError> {
        self.mutate(evening_id, |evening| evening.closed = closed)
    }

    /// Apply a mutation to one evening, mark it current and persist the
    /// whole collection.
    fn mutate(
        &mut self,
        evening_id: &str,
        f: impl FnOnce(&mut Evening),
    ) -> Result<(), LedgerError> {
        let Some(evening) = self.evenings.iter_mut().find(|e| e.id == evening_id) else {
            return Err(LedgerError::UnknownEvening {
                id: evening_id.to_string(),
            });
        };
        f(evening);
        self.current_id = Some(evening_id.to_string());
        self.persist()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.repository
            .save_evenings(&self.evenings)
            .map_err(|source| LedgerError::Storage {
                store: "evenings",
                source,
            })
    }
}
