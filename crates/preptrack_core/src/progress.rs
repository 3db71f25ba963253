//! Progress calculation over catalog snapshots.
//!
//! # Responsibility
//! - Derive 0..=100 integer percentages from topic and subtopic statuses.
//!
//! # Invariants
//! - Pure and stateless: every call recomputes from the given snapshot.
//! - Empty inputs yield `0` instead of dividing by zero.
//! - Topic weight: `done=1.0`, `revise=0.4`, `todo=0.0`, plus
//!   `0.5 * done_subtopics / subtopics` when subtopics exist. A `revise`
//!   topic with every subtopic done therefore caps at `0.9`, not `1.5`.

use crate::model::catalog::{Catalog, EntityId, Section, Status, Topic};

/// Highest weight a single topic can reach.
pub const MAX_TOPIC_WEIGHT: f64 = 1.5;

const DONE_WEIGHT: f64 = 1.0;
const REVISE_WEIGHT: f64 = 0.4;
const SUBTOPIC_SHARE: f64 = 0.5;

/// Sidebar projection for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub id: EntityId,
    pub title: String,
    pub topic_count: usize,
    pub progress: u8,
}

/// Weight contributed by one topic, in `0.0..=1.5`.
pub fn topic_weight(topic: &Topic) -> f64 {
    let own = match topic.status {
        Status::Done => DONE_WEIGHT,
        Status::Revise => REVISE_WEIGHT,
        Status::Todo => 0.0,
    };

    if topic.subtopics.is_empty() {
        return own;
    }

    let done = topic
        .subtopics
        .iter()
        .filter(|sub| sub.status == Status::Done)
        .count();
    own + (done as f64 / topic.subtopics.len() as f64) * SUBTOPIC_SHARE
}

/// Progress percentage of one section.
pub fn section_progress(section: &Section) -> u8 {
    percent_of(section.topics.iter())
}

/// Progress percentage across every topic of every section.
pub fn overall_progress(catalog: &Catalog) -> u8 {
    percent_of(catalog.topics())
}

/// Per-section summaries in catalog order.
pub fn section_summaries(catalog: &Catalog) -> Vec<SectionSummary> {
    catalog
        .sections
        .iter()
        .map(|section| SectionSummary {
            id: section.id.clone(),
            title: section.title.clone(),
            topic_count: section.topics.len(),
            progress: section_progress(section),
        })
        .collect()
}

fn percent_of<'a>(topics: impl Iterator<Item = &'a Topic>) -> u8 {
    let (count, score) = topics.fold((0usize, 0.0f64), |(count, score), topic| {
        (count + 1, score + topic_weight(topic))
    });
    if count == 0 {
        return 0;
    }

    let max_score = count as f64 * MAX_TOPIC_WEIGHT;
    // f64::round is half-away-from-zero; scores are never negative.
    (score / max_score * 100.0).round().clamp(0.0, 100.0) as u8
}
