//! Drag-and-drop resolution for topic reordering.
//!
//! # Responsibility
//! - Translate a gesture report ("moved from A to B in collection X, or
//!   dropped nowhere") into a reorder, or into an explicit rejection the UI
//!   can surface.
//!
//! # Invariants
//! - Only moves within one section's topic collection are applied.
//! - Every rejected drop leaves the catalog unchanged.

use crate::model::catalog::{Catalog, EntityId};
use crate::mutation::catalog_ops::reorder_topics;

/// Collection id prefix used by topic lists, as in `topics::<section_id>`.
pub const TOPIC_COLLECTION_PREFIX: &str = "topics::";

/// Position inside a named collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLocation {
    pub collection_id: String,
    pub index: usize,
}

/// Gesture report from the drag source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub source: DropLocation,
    /// `None` when the item was dropped outside any valid target.
    pub destination: Option<DropLocation>,
}

/// Result of resolving one drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Topic moved within its section.
    Moved {
        section_id: EntityId,
        from_index: usize,
        to_index: usize,
    },
    /// Item was released outside any drop target.
    DroppedOutside,
    /// Source and destination are different sections.
    CrossSection {
        source_section: EntityId,
        destination_section: EntityId,
    },
    /// Collection id is malformed or names an unknown section.
    UnknownCollection(String),
    /// Source index does not address a topic.
    OutOfRange { index: usize, len: usize },
}

impl ReorderOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// Stable short code for logs and UI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::DroppedOutside => "dropped_outside",
            Self::CrossSection { .. } => "cross_section",
            Self::UnknownCollection(_) => "unknown_collection",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Builds the collection id for one section's topic list.
pub fn topic_collection_id(section_id: &str) -> String {
    format!("{TOPIC_COLLECTION_PREFIX}{section_id}")
}

/// Extracts the section id from a topic collection id.
pub fn parse_topic_collection(collection_id: &str) -> Option<&str> {
    collection_id
        .strip_prefix(TOPIC_COLLECTION_PREFIX)
        .filter(|section_id| !section_id.is_empty())
}

/// Resolves a drop against `catalog`, returning the next catalog and the
/// outcome. Rejections return a catalog equal to the input.
pub fn apply_drop(catalog: &Catalog, event: &DropEvent) -> (Catalog, ReorderOutcome) {
    let outcome = resolve_drop(catalog, event);
    match &outcome {
        ReorderOutcome::Moved {
            section_id,
            from_index,
            to_index,
        } => (
            reorder_topics(catalog, section_id, *from_index, *to_index),
            outcome,
        ),
        _ => (catalog.clone(), outcome),
    }
}

fn resolve_drop(catalog: &Catalog, event: &DropEvent) -> ReorderOutcome {
    let Some(destination) = &event.destination else {
        return ReorderOutcome::DroppedOutside;
    };

    let Some(source_section) = parse_topic_collection(&event.source.collection_id) else {
        return ReorderOutcome::UnknownCollection(event.source.collection_id.clone());
    };
    let Some(destination_section) = parse_topic_collection(&destination.collection_id) else {
        return ReorderOutcome::UnknownCollection(destination.collection_id.clone());
    };

    if source_section != destination_section {
        return ReorderOutcome::CrossSection {
            source_section: source_section.to_string(),
            destination_section: destination_section.to_string(),
        };
    }

    let Some(section) = catalog.section(source_section) else {
        return ReorderOutcome::UnknownCollection(event.source.collection_id.clone());
    };

    let len = section.topics.len();
    if event.source.index >= len {
        return ReorderOutcome::OutOfRange {
            index: event.source.index,
            len,
        };
    }

    ReorderOutcome::Moved {
        section_id: section.id.clone(),
        from_index: event.source.index,
        to_index: destination.index.min(len - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_drop, parse_topic_collection, topic_collection_id, DropEvent, DropLocation,
        ReorderOutcome,
    };
    use crate::model::catalog::{Catalog, Section, Topic};

    fn catalog() -> Catalog {
        let mut first = Section::new("First");
        first.topics = vec![Topic::new("a"), Topic::new("b"), Topic::new("c")];
        let second = Section::new("Second");
        Catalog::new(vec![first, second])
    }

    fn at(section_id: &str, index: usize) -> DropLocation {
        DropLocation {
            collection_id: topic_collection_id(section_id),
            index,
        }
    }

    #[test]
    fn collection_ids_round_trip() {
        assert_eq!(parse_topic_collection(&topic_collection_id("dsa")), Some("dsa"));
        assert_eq!(parse_topic_collection("topics::"), None);
        assert_eq!(parse_topic_collection("subtopics::dsa"), None);
    }

    #[test]
    fn same_section_drop_reorders() {
        let catalog = catalog();
        let sec = catalog.sections[0].id.clone();

        let (next, outcome) = apply_drop(
            &catalog,
            &DropEvent {
                source: at(&sec, 2),
                destination: Some(at(&sec, 0)),
            },
        );
        assert!(outcome.is_applied());
        let titles: Vec<_> = next.sections[0].topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn rejected_drops_leave_catalog_unchanged() {
        let catalog = catalog();
        let first = catalog.sections[0].id.clone();
        let second = catalog.sections[1].id.clone();

        let cases = [
            (
                DropEvent {
                    source: at(&first, 0),
                    destination: None,
                },
                "dropped_outside",
            ),
            (
                DropEvent {
                    source: at(&first, 0),
                    destination: Some(at(&second, 0)),
                },
                "cross_section",
            ),
            (
                DropEvent {
                    source: at("ghost", 0),
                    destination: Some(at("ghost", 1)),
                },
                "unknown_collection",
            ),
            (
                DropEvent {
                    source: at(&first, 5),
                    destination: Some(at(&first, 0)),
                },
                "out_of_range",
            ),
        ];

        for (event, code) in cases {
            let (next, outcome) = apply_drop(&catalog, &event);
            assert_eq!(outcome.code(), code);
            assert!(!outcome.is_applied());
            assert_eq!(next, catalog);
        }
    }

    #[test]
    fn cross_section_names_both_sections() {
        let catalog = catalog();
        let first = catalog.sections[0].id.clone();
        let second = catalog.sections[1].id.clone();

        let (_, outcome) = apply_drop(
            &catalog,
            &DropEvent {
                source: at(&first, 1),
                destination: Some(at(&second, 0)),
            },
        );
        assert_eq!(
            outcome,
            ReorderOutcome::CrossSection {
                source_section: first,
                destination_section: second,
            }
        );
    }
}
