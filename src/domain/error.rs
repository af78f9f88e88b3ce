//! Error taxonomy for the ledger domain.
//!
//! Invalid numeric input is deliberately *not* represented here: entry fees,
//! prices and penalty counts go through the permissive coercion in
//! [`crate::domain::parse`] and never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A derived penalty or game-type id collides with an existing one. The
    /// configuration is left unchanged.
    #[error("id '{id}' already exists in the configuration")]
    DuplicateId { id: String },

    /// An import document was not valid serialized data. Existing state is
    /// left untouched.
    #[error("snapshot document could not be parsed")]
    Parse(#[source] serde_json::Error),

    /// A persistence read or write failed. The in-memory state stays valid
    /// and is never rolled back; the caller decides whether to warn the user.
    #[error("storage access for {store} failed")]
    Storage {
        store: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// An operation addressed an evening that does not exist.
    #[error("no evening with id '{id}'")]
    UnknownEvening { id: String },
}
