//! Snapshot service: whole-dataset export/import and the settlement CSV
//! export.
//!
//! The service is stateless; it orchestrates the stateful services it is
//! handed, so import can overwrite exactly the stores a document carries.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};

use crate::domain::config_service::ConfigService;
use crate::domain::error::LedgerError;
use crate::domain::evening_service::EveningService;
use crate::domain::models::{Snapshot, SnapshotDocument, SNAPSHOT_FORMAT_VERSION};
use crate::domain::roster_service::RosterService;
use crate::domain::settlement::settle_evening;
use crate::storage::Connection;

/// Which stores an import actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub configuration_applied: bool,
    pub evenings_applied: usize,
    pub saved_players_applied: bool,
}

#[derive(Clone, Default)]
pub struct SnapshotService;

impl SnapshotService {
    pub fn new() -> Self {
        Self
    }

    /// Serialize all three stores into one snapshot document.
    pub fn export_snapshot<C: Connection>(
        &self,
        config: &ConfigService<C>,
        evenings: &EveningService<C>,
        roster: &RosterService<C>,
    ) -> Result<String, LedgerError> {
        let snapshot = Snapshot {
            evenings: evenings.evenings().to_vec(),
            configuration: config.configuration().clone(),
            saved_players: roster.names().to_vec(),
            export_timestamp: Utc::now().to_rfc3339(),
            format_version: SNAPSHOT_FORMAT_VERSION.to_string(),
        };
        serde_json::to_string_pretty(&snapshot).map_err(LedgerError::Parse)
    }

    /// Write a snapshot to a file. With no explicit path the export goes to
    /// the user's Documents folder (home directory as fallback) under a
    /// dated filename. Returns the path written.
    pub fn export_to_path<C: Connection>(
        &self,
        custom_path: Option<&Path>,
        config: &ConfigService<C>,
        evenings: &EveningService<C>,
        roster: &RosterService<C>,
    ) -> Result<PathBuf, LedgerError> {
        let json = self.export_snapshot(config, evenings, roster)?;

        let path = match custom_path {
            Some(path) => path.to_path_buf(),
            None => {
                let dir = dirs::document_dir()
                    .or_else(dirs::home_dir)
                    .ok_or_else(|| LedgerError::Storage {
                        store: "snapshot",
                        source: anyhow::anyhow!("could not determine an export directory"),
                    })?;
                dir.join(format!(
                    "kegelbuch_export_{}.json",
                    Utc::now().format("%Y%m%d")
                ))
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LedgerError::Storage {
                store: "snapshot",
                source: e.into(),
            })?;
        }
        fs::write(&path, json).map_err(|e| LedgerError::Storage {
            store: "snapshot",
            source: e.into(),
        })?;
        info!("Exported snapshot to {}", path.display());
        Ok(path)
    }

    /// Parse a snapshot document and overwrite every store whose key is
    /// present; absent keys leave their store untouched. A document that
    /// does not parse fails with [`LedgerError::Parse`] before any state
    /// changes.
    pub fn import_snapshot<C: Connection>(
        &self,
        text: &str,
        config: &mut ConfigService<C>,
        evenings: &mut EveningService<C>,
        roster: &mut RosterService<C>,
    ) -> Result<ImportSummary, LedgerError> {
        let document: SnapshotDocument =
            serde_json::from_str(text).map_err(LedgerError::Parse)?;

        if let Some(version) = &document.format_version {
            if version != SNAPSHOT_FORMAT_VERSION {
                // Opaque tag, carried for forward compatibility only.
                warn!("Importing snapshot with format version '{}'", version);
            }
        }

        let mut summary = ImportSummary {
            configuration_applied: false,
            evenings_applied: 0,
            saved_players_applied: false,
        };
        if let Some(configuration) = document.configuration {
            config.replace(configuration)?;
            summary.configuration_applied = true;
        }
        if let Some(imported) = document.evenings {
            summary.evenings_applied = imported.len();
            evenings.replace(imported)?;
        }
        if let Some(names) = document.saved_players {
            roster.replace(names)?;
            summary.saved_players_applied = true;
        }
        info!(
            "Imported snapshot: configuration={}, evenings={}, saved_players={}",
            summary.configuration_applied, summary.evenings_applied, summary.saved_players_applied
        );
        Ok(summary)
    }

    /// Single-shot read of a snapshot file followed by an import.
    pub fn import_from_path<C: Connection>(
        &self,
        path: &Path,
        config: &mut ConfigService<C>,
        evenings: &mut EveningService<C>,
        roster: &mut RosterService<C>,
    ) -> Result<ImportSummary, LedgerError> {
        let text = fs::read_to_string(path).map_err(|e| LedgerError::Storage {
            store: "snapshot",
            source: e.into(),
        })?;
        self.import_snapshot(&text, config, evenings, roster)
    }

    /// Render one evening's settlement as CSV for sharing: one row per
    /// player plus a grand-total row, amounts formatted to two decimals.
    pub fn export_settlement_csv<C: Connection>(
        &self,
        evening_id: &str,
        config: &ConfigService<C>,
        evenings: &EveningService<C>,
    ) -> Result<String, LedgerError> {
        let Some(evening) = evenings.evening(evening_id) else {
            return Err(LedgerError::UnknownEvening {
                id: evening_id.to_string(),
            });
        };
        let settlement = settle_evening(evening, config.configuration());
        let symbol = &config.configuration().currency_symbol;

        let mut csv = String::from("player,amount\n");
        for line in &settlement.lines {
            csv.push_str(&format!(
                "\"{}\",{:.2} {}\n",
                line.name.replace('"', "\"\""),
                line.amount,
                symbol
            ));
        }
        csv.push_str(&format!("total,{:.2} {}\n", settlement.grand_total, symbol));
        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileConnection;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        config: ConfigService<FileConnection>,
        evenings: EveningService<FileConnection>,
        roster: RosterService<FileConnection>,
        service: SnapshotService,
        _temp_dir: TempDir,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(FileConnection::new(temp_dir.path()).unwrap());
        Fixture {
            config: ConfigService::new(connection.clone()).unwrap(),
            evenings: EveningService::new(connection.clone()).unwrap(),
            roster: RosterService::new(connection).unwrap(),
            service: SnapshotService::new(),
            _temp_dir: temp_dir,
        }
    }

    fn populate(f: &mut Fixture) {
        f.config.set_entry_fee("5").unwrap();
        f.roster.add_name("Anna").unwrap();
        f.roster.add_name("Bernd").unwrap();
        let evening = f.evenings.create_evening(None).unwrap();
        let anna = f.evenings.add_player(&evening.id, "Anna").unwrap();
        f.evenings
            .set_penalty_count(&evening.id, &anna.id, "kalle", "2")
            .unwrap();
    }

    #[test]
    fn export_import_round_trips() {
        let mut source = fixture();
        populate(&mut source);
        let json = source
            .service
            .export_snapshot(&source.config, &source.evenings, &source.roster)
            .unwrap();

        let mut target = fixture();
        let summary = target
            .service
            .import_snapshot(&json, &mut target.config, &mut target.evenings, &mut target.roster)
            .unwrap();

        assert!(summary.configuration_applied);
        assert_eq!(summary.evenings_applied, 1);
        assert!(summary.saved_players_applied);
        assert_eq!(target.config.configuration(), source.config.configuration());
        assert_eq!(target.evenings.evenings(), source.evenings.evenings());
        assert_eq!(target.roster.names(), source.roster.names());
    }

    #[test]
    fn export_carries_format_version() {
        let f = fixture();
        let json = f
            .service
            .export_snapshot(&f.config, &f.evenings, &f.roster)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["format_version"], "1.0");
        assert!(value["export_timestamp"].is_string());
    }

    #[test]
    fn partial_import_leaves_other_stores_untouched() {
        let mut f = fixture();
        populate(&mut f);
        let evenings_before = f.evenings.evenings().to_vec();
        let roster_before = f.roster.names().to_vec();

        let document = r#"{ "configuration": {
            "entry_fee": 9.0, "penalties": [], "game_types": [], "currency_symbol": "$"
        } }"#;
        let summary = f
            .service
            .import_snapshot(document, &mut f.config, &mut f.evenings, &mut f.roster)
            .unwrap();

        assert!(summary.configuration_applied);
        assert_eq!(summary.evenings_applied, 0);
        assert!(!summary.saved_players_applied);
        assert_eq!(f.config.configuration().entry_fee, 9.0);
        assert_eq!(f.evenings.evenings(), evenings_before);
        assert_eq!(f.roster.names(), roster_before);
    }

    #[test]
    fn malformed_document_changes_nothing() {
        let mut f = fixture();
        populate(&mut f);
        let config_before = f.config.configuration().clone();
        let evenings_before = f.evenings.evenings().to_vec();

        let err = f
            .service
            .import_snapshot("{ not json", &mut f.config, &mut f.evenings, &mut f.roster)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Parse(_)));
        assert_eq!(*f.config.configuration(), config_before);
        assert_eq!(f.evenings.evenings(), evenings_before);
    }

    #[test]
    fn import_from_path_reads_the_file() {
        let mut source = fixture();
        populate(&mut source);
        let export_dir = TempDir::new().unwrap();
        let path = source
            .service
            .export_to_path(
                Some(&export_dir.path().join("backup.json")),
                &source.config,
                &source.evenings,
                &source.roster,
            )
            .unwrap();

        let mut target = fixture();
        target
            .service
            .import_from_path(&path, &mut target.config, &mut target.evenings, &mut target.roster)
            .unwrap();
        assert_eq!(target.evenings.evenings(), source.evenings.evenings());
    }

    #[test]
    fn settlement_csv_lists_players_and_total() {
        let mut f = fixture();
        f.config.set_entry_fee("6").unwrap();
        let evening = f.evenings.create_evening(None).unwrap();
        let anna = f.evenings.add_player(&evening.id, "Anna").unwrap();
        f.evenings.add_player(&evening.id, "Bernd").unwrap();
        f.evenings
            .set_penalty_count(&evening.id, &anna.id, "kalle", "2")
            .unwrap();
        f.evenings
            .set_penalty_count(&evening.id, &anna.id, "kranz", "1")
            .unwrap();

        let csv = f
            .service
            .export_settlement_csv(&evening.id, &f.config, &f.evenings)
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "player,amount");
        assert_eq!(lines[1], "\"Anna\",7.00 €");
        assert_eq!(lines[2], "\"Bernd\",6.50 €");
        assert_eq!(lines[3], "total,13.50 €");
    }

    #[test]
    fn settlement_csv_for_unknown_evening_fails() {
        let f = fixture();
        let err = f
            .service
            .export_settlement_csv("no-such-evening", &f.config, &f.evenings)
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnknownEvening { .. }));
    }
}
