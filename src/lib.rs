//! # Kegelbuch
//!
//! Ledger backend for recurring social bowling evenings: who attended, which
//! penalties they racked up, what game results were recorded, and — via the
//! settlement engine — what everyone owes.
//!
//! The crate is presentation-free. A UI layer drives it through [`Backend`]
//! and the services it exposes; every mutation is persisted in full
//! immediately, and settlement totals are always derived, never stored.
//!
//! ```no_run
//! use kegelbuch::Backend;
//! use kegelbuch::domain::settlement::settle_evening;
//!
//! let mut backend = Backend::new()?;
//! let evening = backend.evening_service.create_evening(None)?;
//! let anna = backend.evening_service.add_player(&evening.id, "Anna")?;
//! backend
//!     .evening_service
//!     .set_penalty_count(&evening.id, &anna.id, "kalle", "2")?;
//!
//! let evening = backend.evening_service.evening(&evening.id).unwrap();
//! let settlement = settle_evening(evening, backend.config_service.configuration());
//! println!("grand total: {:.2}", settlement.grand_total);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod domain;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub use domain::models::{Configuration, Evening, GameTypeDefinition, PenaltyDefinition, Player};
pub use domain::settlement::{grand_total, player_total, settle_evening, EveningSettlement};
pub use domain::{ConfigService, EveningService, LedgerError, RosterService, SnapshotService};
pub use storage::FileConnection;

/// Composition root owning all services over the file backend.
///
/// The application state (configuration, evening collection, saved-player
/// roster) lives inside the services; nothing is global.
pub struct Backend {
    pub config_service: ConfigService<FileConnection>,
    pub evening_service: EveningService<FileConnection>,
    pub roster_service: RosterService<FileConnection>,
    pub snapshot_service: SnapshotService,
}

impl Backend {
    /// Open the backend in the default data directory.
    pub fn new() -> Result<Self> {
        Self::with_connection(FileConnection::new_default()?)
    }

    /// Open the backend in an explicit data directory.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_connection(FileConnection::new(data_dir)?)
    }

    fn with_connection(connection: FileConnection) -> Result<Self> {
        let connection = Arc::new(connection);
        Ok(Self {
            config_service: ConfigService::new(connection.clone())?,
            evening_service: EveningService::new(connection.clone())?,
            roster_service: RosterService::new(connection)?,
            snapshot_service: SnapshotService::new(),
        })
    }

    /// Import a snapshot document, overwriting every store it carries.
    pub fn import_snapshot(&mut self, text: &str) -> Result<domain::ImportSummary, LedgerError> {
        self.snapshot_service.import_snapshot(
            text,
            &mut self.config_service,
            &mut self.evening_service,
            &mut self.roster_service,
        )
    }

    /// Export all stores as one snapshot document.
    pub fn export_snapshot(&self) -> Result<String, LedgerError> {
        self.snapshot_service.export_snapshot(
            &self.config_service,
            &self.evening_service,
            &self.roster_service,
        )
    }
}
