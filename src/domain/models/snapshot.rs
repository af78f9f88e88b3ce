//! Snapshot documents for whole-dataset export and import.

use serde::{Deserialize, Serialize};

use super::config::Configuration;
use super::evening::Evening;

/// Format tag written into every export. Opaque to this crate; it is
/// preserved and re-emitted for forward compatibility, never interpreted.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1.0";

/// A full export of all three stores, produced by export operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub evenings: Vec<Evening>,
    pub configuration: Configuration,
    pub saved_players: Vec<String>,
    /// RFC 3339 timestamp of the export.
    pub export_timestamp: String,
    pub format_version: String,
}

/// Import-side view of a snapshot. Every store key is optional: keys present
/// in the document fully overwrite the corresponding store, absent keys
/// leave it untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub evenings: Option<Vec<Evening>>,
    #[serde(default)]
    pub configuration: Option<Configuration>,
    #[serde(default)]
    pub saved_players: Option<Vec<String>>,
    #[serde(default)]
    pub format_version: Option<String>,
}
