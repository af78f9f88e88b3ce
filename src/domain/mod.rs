//! Domain layer: models, the settlement engine and the stateful services.

pub mod config_service;
pub mod error;
pub mod evening_service;
pub mod models;
pub mod parse;
pub mod roster_service;
pub mod settlement;
pub mod snapshot_service;

pub use config_service::ConfigService;
pub use error::LedgerError;
pub use evening_service::EveningService;
pub use roster_service::RosterService;
pub use snapshot_service::{ImportSummary, SnapshotService};
