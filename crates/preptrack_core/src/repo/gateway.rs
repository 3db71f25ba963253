//! Typed persistence gateway for catalog and profile snapshots.
//!
//! # Responsibility
//! - Serialize snapshots to JSON under two independent keys.
//! - Turn anything unreadable back into "absent" on load.
//!
//! # Invariants
//! - Catalog and profile slots are written independently; there is no
//!   transactional coupling between them.
//! - Load never fails: storage errors and corrupt documents become `None`.

use crate::model::catalog::Catalog;
use crate::model::normalize::{parse_catalog, parse_profile};
use crate::model::profile::Profile;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::warn;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the catalog record.
pub const CATALOG_KEY: &str = "sde_prep_tracker_v1";
/// Storage key of the profile record.
pub const PROFILE_KEY: &str = "sde_prep_profile_v1";

/// Errors from gateway writes.
#[derive(Debug)]
pub enum GatewayError {
    /// Snapshot could not be encoded.
    Encode(serde_json::Error),
    /// Underlying store rejected the write.
    Store(KvError),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<KvError> for GatewayError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Snapshot gateway over any key-value store.
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads and normalizes the persisted catalog, if a usable one exists.
    pub fn load_catalog(&self) -> Option<Catalog> {
        let raw = self.load_raw(CATALOG_KEY)?;
        match parse_catalog(&raw) {
            Ok(catalog) => Some(catalog),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=gateway status=corrupt key={CATALOG_KEY} error={err}"
                );
                None
            }
        }
    }

    /// Loads and normalizes the persisted profile, if a usable one exists.
    pub fn load_profile(&self) -> Option<Profile> {
        let raw = self.load_raw(PROFILE_KEY)?;
        match parse_profile(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=gateway status=corrupt key={PROFILE_KEY} error={err}"
                );
                None
            }
        }
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), GatewayError> {
        self.save_json(CATALOG_KEY, catalog)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), GatewayError> {
        self.save_json(PROFILE_KEY, profile)
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), GatewayError> {
        let encoded = serde_json::to_string(value)?;
        self.store.save(key, &encoded)?;
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=snapshot_load module=gateway status=error key={key} error={err}");
                None
            }
        }
    }
}
