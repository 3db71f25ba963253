//! Core domain logic for PrepTrack.
//! This crate is the single source of truth for tracker invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod progress;
pub mod repo;
pub mod search;
pub mod service;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{Catalog, EntityId, Section, Status, Subtopic, Topic};
pub use model::profile::{LinkKind, Profile, ProfileField, ProfileLinks};
pub use mutation::reorder::{
    parse_topic_collection, topic_collection_id, DropEvent, DropLocation, ReorderOutcome,
};
pub use progress::{overall_progress, section_progress, SectionSummary};
pub use repo::gateway::{GatewayError, PersistenceGateway, CATALOG_KEY, PROFILE_KEY};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, SqliteKvStore};
pub use search::topic_search::{search_topics, MatchField, TopicHit};
pub use service::tracker_store::{RemovalRequest, TrackerStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
