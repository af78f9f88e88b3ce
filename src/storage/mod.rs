//! Persistence layer: storage traits and the file backend.

pub mod file;
pub mod traits;

pub use file::FileConnection;
pub use traits::{ConfigStorage, Connection, EveningStorage, SavedPlayerStorage};
