//! Catalog mutation operations.
//!
//! # Responsibility
//! - Provide pure snapshot-in, snapshot-out edits of the catalog tree.
//! - Resolve drag gestures into topic reorders or explicit rejections.
//!
//! # Invariants
//! - No operation fails for an unknown id; it returns an unchanged catalog.

pub mod catalog_ops;
pub mod reorder;
