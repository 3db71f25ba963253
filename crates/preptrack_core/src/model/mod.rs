//! Tracker domain model.
//!
//! # Responsibility
//! - Define the catalog tree (sections, topics, subtopics) and the profile.
//! - Normalize partially-shaped persisted documents into typed values.
//!
//! # Invariants
//! - Typed models are always fully populated; defaulting happens only in
//!   `normalize`.

pub mod catalog;
pub mod normalize;
pub mod profile;
