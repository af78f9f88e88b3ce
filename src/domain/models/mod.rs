//! Domain models for the bowling-evening ledger.

pub mod config;
pub mod evening;
pub mod snapshot;

pub use config::{slug_id, Configuration, GameTypeDefinition, PenaltyDefinition};
pub use evening::{Evening, Player};
pub use snapshot::{Snapshot, SnapshotDocument, SNAPSHOT_FORMAT_VERSION};
