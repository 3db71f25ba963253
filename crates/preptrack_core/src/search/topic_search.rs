//! Catalog text search.
//!
//! # Responsibility
//! - Find topics and subtopics whose title or notes contain a query.
//!
//! # Invariants
//! - Matching is literal and case-insensitive; regex syntax in the query is
//!   never interpreted.
//! - Hits are returned in catalog order; a blank query yields no hits.

use crate::model::catalog::{Catalog, EntityId};
use regex::{Regex, RegexBuilder};

/// Which text field produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Notes,
}

/// One search hit. `subtopic_id` is set when the match is on a subtopic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHit {
    pub section_id: EntityId,
    pub topic_id: EntityId,
    pub subtopic_id: Option<EntityId>,
    pub title: String,
    pub field: MatchField,
}

/// Searches titles and notes of every topic and subtopic.
pub fn search_topics(catalog: &Catalog, query: &str) -> Vec<TopicHit> {
    let Some(matcher) = build_matcher(query) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for section in &catalog.sections {
        for topic in &section.topics {
            if let Some(field) = match_field(&matcher, &topic.title, &topic.notes) {
                hits.push(TopicHit {
                    section_id: section.id.clone(),
                    topic_id: topic.id.clone(),
                    subtopic_id: None,
                    title: topic.title.clone(),
                    field,
                });
            }
            for sub in &topic.subtopics {
                if let Some(field) = match_field(&matcher, &sub.title, &sub.notes) {
                    hits.push(TopicHit {
                        section_id: section.id.clone(),
                        topic_id: topic.id.clone(),
                        subtopic_id: Some(sub.id.clone()),
                        title: sub.title.clone(),
                        field,
                    });
                }
            }
        }
    }
    hits
}

fn build_matcher(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
        .ok()
}

fn match_field(matcher: &Regex, title: &str, notes: &str) -> Option<MatchField> {
    if matcher.is_match(title) {
        Some(MatchField::Title)
    } else if matcher.is_match(notes) {
        Some(MatchField::Notes)
    } else {
        None
    }
}
