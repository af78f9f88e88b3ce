//! Configuration service: owns the in-memory fee schedule and persists it
//! after every mutation.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, info};

use crate::domain::error::LedgerError;
use crate::domain::models::{slug_id, Configuration, GameTypeDefinition, PenaltyDefinition};
use crate::domain::parse::coerce_amount;
use crate::storage::{ConfigStorage, Connection};

/// Owns the [`Configuration`] and all mutation operations over it.
///
/// Every mutation is followed by a full persist. A failed persist is
/// reported as [`LedgerError::Storage`] but never rolls the in-memory
/// configuration back.
pub struct ConfigService<C: Connection> {
    repository: C::ConfigRepository,
    config: Configuration,
}

impl<C: Connection> ConfigService<C> {
    /// Load the persisted configuration, or start from the built-in defaults
    /// on first run. Shipped defaults are merged by id union, preferring
    /// persisted entries, so user-added penalties and edited prices survive
    /// a reload while newly shipped categories still appear.
    pub fn new(connection: Arc<C>) -> Result<Self> {
        let repository = connection.create_config_repository();
        let config = match repository.load_config()? {
            Some(persisted) => Self::merge_shipped_defaults(persisted),
            None => {
                info!("No persisted configuration, starting from built-in defaults");
                Configuration::default()
            }
        };
        Ok(Self { repository, config })
    }

    fn merge_shipped_defaults(mut config: Configuration) -> Configuration {
        let shipped = Configuration::default();
        for penalty in shipped.penalties {
            if config.penalty(&penalty.id).is_none() {
                info!("Adding newly shipped penalty '{}'", penalty.id);
                config.penalties.push(penalty);
            }
        }
        for game_type in shipped.game_types {
            if config.game_type(&game_type.id).is_none() {
                info!("Adding newly shipped game type '{}'", game_type.id);
                config.game_types.push(game_type);
            }
        }
        config
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Replace the whole configuration, e.g. from a snapshot import.
    pub fn replace(&mut self, config: Configuration) -> Result<(), LedgerError> {
        self.config = config;
        self.persist()
    }

    /// Set the entry fee from raw input; invalid input coerces to zero.
    pub fn set_entry_fee(&mut self, raw: &str) -> Result<(), LedgerError> {
        self.config.entry_fee = coerce_amount(raw);
        self.persist()
    }

    /// Set a penalty's unit price from raw input; invalid input coerces to
    /// zero, an unknown id is a silent no-op.
    pub fn set_penalty_price(&mut self, id: &str, raw: &str) -> Result<(), LedgerError> {
        let Some(penalty) = self.config.penalties.iter_mut().find(|p| p.id == id) else {
            debug!("set_penalty_price: no penalty '{}', ignoring", id);
            return Ok(());
        };
        penalty.unit_price = coerce_amount(raw);
        self.persist()
    }

    /// Append a new penalty. The id is derived from the label; a collision
    /// fails with [`LedgerError::DuplicateId`] and leaves the configuration
    /// unchanged.
    pub fn add_penalty(
        &mut self,
        label: &str,
        description: &str,
        unit_price: f64,
        inverted: bool,
    ) -> Result<(), LedgerError> {
        let penalty = PenaltyDefinition::new(label, description, unit_price, inverted);
        if self.config.penalty(&penalty.id).is_some() {
            return Err(LedgerError::DuplicateId { id: penalty.id });
        }
        info!("Adding penalty '{}' ({})", penalty.id, penalty.label);
        self.config.penalties.push(penalty);
        self.persist()
    }

    /// Remove a penalty by id; no-op if absent.
    pub fn remove_penalty(&mut self, id: &str) -> Result<(), LedgerError> {
        let before = self.config.penalties.len();
        self.config.penalties.retain(|p| p.id != id);
        if self.config.penalties.len() == before {
            debug!("remove_penalty: no penalty '{}', ignoring", id);
            return Ok(());
        }
        self.persist()
    }

    /// Append a new game type, with the same derived-id and duplicate rules
    /// as penalties.
    pub fn add_game_type(&mut self, label: &str, description: &str) -> Result<(), LedgerError> {
        let id = slug_id(label);
        if self.config.game_type(&id).is_some() {
            return Err(LedgerError::DuplicateId { id });
        }
        self.config
            .game_types
            .push(GameTypeDefinition::new(label, description));
        self.persist()
    }

    /// Remove a game type by id; no-op if absent.
    pub fn remove_game_type(&mut self, id: &str) -> Result<(), LedgerError> {
        let before = self.config.game_types.len();
        self.config.game_types.retain(|g| g.id != id);
        if self.config.game_types.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn set_currency_symbol(&mut self, symbol: &str) -> Result<(), LedgerError> {
        self.config.currency_symbol = symbol.to_string();
        self.persist()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.repository
            .save_config(&self.config)
            .map_err(|source| LedgerError::Storage {
                store: "configuration",
                source,
            })
    }
}
