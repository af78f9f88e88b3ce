//! Storage abstraction traits.
//!
//! The domain services work against these traits so that the file backend
//! can be swapped without touching any domain logic. Every store is a single
//! serialized blob and every save is a full overwrite; there is no partial
//! or incremental persistence.

use anyhow::Result;

use crate::domain::models::{Configuration, Evening};

/// Interface for configuration persistence.
pub trait ConfigStorage: Send + Sync {
    /// Load the persisted configuration, `None` if nothing has been saved yet.
    fn load_config(&self) -> Result<Option<Configuration>>;

    /// Full overwrite of the persisted configuration.
    fn save_config(&self, config: &Configuration) -> Result<()>;
}

/// Interface for the evening collection.
pub trait EveningStorage: Send + Sync {
    /// Load all persisted evenings, empty if nothing has been saved yet.
    fn load_evenings(&self) -> Result<Vec<Evening>>;

    /// Full overwrite of the evening collection.
    fn save_evenings(&self, evenings: &[Evening]) -> Result<()>;
}

/// Interface for the saved-player name roster.
pub trait SavedPlayerStorage: Send + Sync {
    /// Load the saved player names, empty if nothing has been saved yet.
    fn load_saved_players(&self) -> Result<Vec<String>>;

    /// Full overwrite of the saved player names.
    fn save_saved_players(&self, names: &[String]) -> Result<()>;
}

/// Factory trait for storage connections.
///
/// Abstracts the concrete backend and hands out one repository per store,
/// so services only name the connection type.
pub trait Connection: Send + Sync + Clone {
    type ConfigRepository: ConfigStorage;
    type EveningRepository: EveningStorage;
    type SavedPlayerRepository: SavedPlayerStorage;

    fn create_config_repository(&self) -> Self::ConfigRepository;
    fn create_evening_repository(&self) -> Self::EveningRepository;
    fn create_saved_player_repository(&self) -> Self::SavedPlayerRepository;
}
