use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(Box::new(value))
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Explicit load/save boundary for client session state. Saves replace the
/// stored session wholesale; the last writer wins.
pub trait SessionStore {
    fn save_session(&self, session: &Session) -> PersistenceResult<()>;
    fn load_session(&self) -> PersistenceResult<Session>;
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    JsonFileSessionStore, load_catalog_from_json, save_catalog_to_json, save_events_to_csv,
    save_events_to_json,
};
