//! On-disk home of the tracker's two snapshot slots.
//!
//! Everything above this module sees one migrated `Connection` holding the
//! `kv_entries` table; opening, pragmas and schema upgrades stay here.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A database stamped by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or upgrading the tracker database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Schema stamp `found` is ahead of the newest migration this build ships.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// True when the file was written by a newer PrepTrack build.
    pub fn is_schema_too_new(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "tracker database uses schema v{found}; this build understands up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
