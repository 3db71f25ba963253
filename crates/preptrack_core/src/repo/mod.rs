//! Persistence layer: key-value substrate and typed snapshot gateway.
//!
//! # Responsibility
//! - Define the opaque key-value contract and its SQLite implementation.
//! - Encode/decode catalog and profile snapshots above that contract.
//!
//! # Invariants
//! - Read paths degrade to "absent" instead of surfacing parse failures.

pub mod gateway;
pub mod kv_repo;
