//! File-based storage backend.
//!
//! Each store is one flat file under the data directory, replaced atomically
//! (temp file + rename) on every save.

pub mod config_repository;
pub mod connection;
pub mod evening_repository;
pub mod saved_player_repository;

pub use config_repository::ConfigRepository;
pub use connection::FileConnection;
pub use evening_repository::EveningRepository;
pub use saved_player_repository::SavedPlayerRepository;
