//! Pure catalog mutations.
//!
//! # Responsibility
//! - Turn `(catalog, target ids, payload)` into a brand-new catalog value.
//!
//! # Invariants
//! - The input catalog is never modified.
//! - A target id that does not resolve yields a catalog equal to the input.
//! - Add operations reject blank titles and store the trimmed title.
//! - Generated ids are fresh; existing ids are never rewritten.

use crate::model::catalog::{Catalog, Section, Subtopic, Topic};

/// Advances one topic's status along the `todo → done → revise` cycle.
pub fn toggle_topic_status(catalog: &Catalog, section_id: &str, topic_id: &str) -> Catalog {
    with_topic(catalog, section_id, topic_id, |topic| {
        topic.status = topic.status.next();
    })
}

/// Advances one subtopic's status along the `todo → done → revise` cycle.
pub fn toggle_subtopic_status(
    catalog: &Catalog,
    section_id: &str,
    topic_id: &str,
    subtopic_id: &str,
) -> Catalog {
    with_subtopic(catalog, section_id, topic_id, subtopic_id, |sub| {
        sub.status = sub.status.next();
    })
}

/// Replaces topic notes verbatim.
pub fn update_topic_notes(
    catalog: &Catalog,
    section_id: &str,
    topic_id: &str,
    notes: &str,
) -> Catalog {
    with_topic(catalog, section_id, topic_id, |topic| {
        topic.notes = notes.to_string();
    })
}

/// Replaces subtopic notes verbatim.
pub fn update_subtopic_notes(
    catalog: &Catalog,
    section_id: &str,
    topic_id: &str,
    subtopic_id: &str,
    notes: &str,
) -> Catalog {
    with_subtopic(catalog, section_id, topic_id, subtopic_id, |sub| {
        sub.notes = notes.to_string();
    })
}

/// Appends a new `todo` topic to the end of one section.
pub fn add_topic(catalog: &Catalog, section_id: &str, title: &str) -> Catalog {
    let Some(title) = normalize_title(title) else {
        return catalog.clone();
    };
    with_section(catalog, section_id, |section| {
        section.topics.push(Topic::new(title));
    })
}

/// Appends a new `todo` subtopic to the end of one topic.
pub fn add_subtopic(catalog: &Catalog, section_id: &str, topic_id: &str, title: &str) -> Catalog {
    let Some(title) = normalize_title(title) else {
        return catalog.clone();
    };
    with_topic(catalog, section_id, topic_id, |topic| {
        topic.subtopics.push(Subtopic::new(title));
    })
}

/// Appends a new empty section to the end of the catalog.
pub fn add_section(catalog: &Catalog, title: &str) -> Catalog {
    let Some(title) = normalize_title(title) else {
        return catalog.clone();
    };
    let mut next = catalog.clone();
    next.sections.push(Section::new(title));
    next
}

/// Drops one topic (and its subtopics) from a section.
pub fn remove_topic(catalog: &Catalog, section_id: &str, topic_id: &str) -> Catalog {
    with_section(catalog, section_id, |section| {
        section.topics.retain(|topic| topic.id != topic_id);
    })
}

/// Renames one topic. Blank titles are rejected, like every add operation.
pub fn rename_topic(catalog: &Catalog, section_id: &str, topic_id: &str, title: &str) -> Catalog {
    let Some(title) = normalize_title(title) else {
        return catalog.clone();
    };
    with_topic(catalog, section_id, topic_id, |topic| {
        topic.title = title;
    })
}

/// Moves the topic at `from_index` to `to_index` within one section.
///
/// `to_index` past the end appends. An out-of-range `from_index` is a no-op.
pub fn reorder_topics(
    catalog: &Catalog,
    section_id: &str,
    from_index: usize,
    to_index: usize,
) -> Catalog {
    with_section(catalog, section_id, |section| {
        if from_index >= section.topics.len() {
            return;
        }
        let moved = section.topics.remove(from_index);
        let target = to_index.min(section.topics.len());
        section.topics.insert(target, moved);
    })
}

fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn with_section(catalog: &Catalog, section_id: &str, edit: impl FnOnce(&mut Section)) -> Catalog {
    let mut next = catalog.clone();
    if let Some(section) = next
        .sections
        .iter_mut()
        .find(|section| section.id == section_id)
    {
        edit(section);
    }
    next
}

fn with_topic(
    catalog: &Catalog,
    section_id: &str,
    topic_id: &str,
    edit: impl FnOnce(&mut Topic),
) -> Catalog {
    with_section(catalog, section_id, |section| {
        if let Some(topic) = section.topics.iter_mut().find(|topic| topic.id == topic_id) {
            edit(topic);
        }
    })
}

fn with_subtopic(
    catalog: &Catalog,
    section_id: &str,
    topic_id: &str,
    subtopic_id: &str,
    edit: impl FnOnce(&mut Subtopic),
) -> Catalog {
    with_topic(catalog, section_id, topic_id, |topic| {
        if let Some(sub) = topic.subtopics.iter_mut().find(|sub| sub.id == subtopic_id) {
            edit(sub);
        }
    })
}
