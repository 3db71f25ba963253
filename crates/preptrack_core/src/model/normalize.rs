//! Load-time normalization of persisted documents.
//!
//! # Responsibility
//! - Accept partially-shaped persisted JSON (missing or `null` optional
//!   fields) through all-optional raw shapes.
//! - Convert raw shapes into fully-populated typed models exactly once, so
//!   no read path ever has to default a field lazily.
//!
//! # Invariants
//! - Missing `topics`/`subtopics` become empty sequences.
//! - Missing or unknown `status` becomes `Status::Todo`.
//! - Missing `notes`/`title`/`color` become empty strings.
//! - Entities without an `id` receive a freshly generated one.

use crate::model::catalog::{
    generate_id, Catalog, Section, Status, Subtopic, Topic, SECTION_ID_PREFIX,
    SUBTOPIC_ID_PREFIX, TOPIC_ID_PREFIX,
};
use crate::model::profile::{Profile, ProfileLinks};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSubtopic {
    id: Option<String>,
    title: Option<String>,
    status: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawTopic {
    id: Option<String>,
    title: Option<String>,
    status: Option<String>,
    notes: Option<String>,
    subtopics: Option<Vec<RawSubtopic>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSection {
    id: Option<String>,
    title: Option<String>,
    color: Option<String>,
    topics: Option<Vec<RawTopic>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProfileLinks {
    github: Option<String>,
    linkedin: Option<String>,
    leetcode: Option<String>,
    gfg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProfile {
    name: Option<String>,
    picture: Option<String>,
    links: Option<RawProfileLinks>,
}

/// Parses a persisted catalog document and normalizes it.
///
/// Returns `Err` only when the text is not JSON or not an array of objects;
/// missing fields never fail.
pub fn parse_catalog(raw: &str) -> serde_json::Result<Catalog> {
    let sections: Vec<RawSection> = serde_json::from_str(raw)?;
    Ok(normalize_catalog(sections))
}

/// Parses a persisted profile document and normalizes it.
pub fn parse_profile(raw: &str) -> serde_json::Result<Profile> {
    let profile: RawProfile = serde_json::from_str(raw)?;
    Ok(normalize_profile(profile))
}

pub(crate) fn normalize_catalog(sections: Vec<RawSection>) -> Catalog {
    Catalog::new(sections.into_iter().map(normalize_section).collect())
}

fn normalize_section(raw: RawSection) -> Section {
    Section {
        id: normalize_id(raw.id, SECTION_ID_PREFIX),
        title: raw.title.unwrap_or_default(),
        color: raw.color.unwrap_or_default(),
        topics: raw
            .topics
            .unwrap_or_default()
            .into_iter()
            .map(normalize_topic)
            .collect(),
    }
}

fn normalize_topic(raw: RawTopic) -> Topic {
    Topic {
        id: normalize_id(raw.id, TOPIC_ID_PREFIX),
        title: raw.title.unwrap_or_default(),
        status: normalize_status(raw.status),
        notes: raw.notes.unwrap_or_default(),
        subtopics: raw
            .subtopics
            .unwrap_or_default()
            .into_iter()
            .map(normalize_subtopic)
            .collect(),
    }
}

fn normalize_subtopic(raw: RawSubtopic) -> Subtopic {
    Subtopic {
        id: normalize_id(raw.id, SUBTOPIC_ID_PREFIX),
        title: raw.title.unwrap_or_default(),
        status: normalize_status(raw.status),
        notes: raw.notes.unwrap_or_default(),
    }
}

fn normalize_profile(raw: RawProfile) -> Profile {
    let defaults = Profile::default();
    let links = raw.links.unwrap_or_default();
    Profile {
        name: raw.name.unwrap_or(defaults.name),
        picture: raw.picture.unwrap_or_default(),
        links: ProfileLinks {
            github: links.github.unwrap_or_default(),
            linkedin: links.linkedin.unwrap_or_default(),
            leetcode: links.leetcode.unwrap_or_default(),
            gfg: links.gfg.unwrap_or_default(),
        },
    }
}

fn normalize_status(raw: Option<String>) -> Status {
    raw.as_deref().and_then(Status::parse).unwrap_or_default()
}

fn normalize_id(raw: Option<String>, prefix: &str) -> String {
    match raw {
        Some(id) if !id.is_empty() => id,
        _ => generate_id(prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, parse_profile};
    use crate::model::catalog::Status;

    #[test]
    fn missing_optional_fields_are_defaulted() {
        let catalog = parse_catalog(
            r#"[{"id":"a","title":"A","topics":[
                {"id":"t1","title":"One"},
                {"id":"t2","title":"Two","status":null,"notes":null,"subtopics":[{"id":"s1","title":"Sub"}]}
            ]},{"id":"b","title":"B"}]"#,
        )
        .unwrap();

        let first = &catalog.sections[0];
        assert_eq!(first.color, "");
        assert_eq!(first.topics[0].status, Status::Todo);
        assert_eq!(first.topics[0].notes, "");
        assert!(first.topics[0].subtopics.is_empty());
        assert_eq!(first.topics[1].subtopics[0].status, Status::Todo);
        assert!(catalog.sections[1].topics.is_empty());
    }

    #[test]
    fn unknown_status_falls_back_to_todo() {
        let catalog =
            parse_catalog(r#"[{"id":"a","topics":[{"id":"t","status":"blocked"}]}]"#).unwrap();
        assert_eq!(catalog.sections[0].topics[0].status, Status::Todo);
    }

    #[test]
    fn missing_ids_are_generated() {
        let catalog = parse_catalog(r#"[{"title":"A","topics":[{"title":"T"}]}]"#).unwrap();
        assert!(catalog.sections[0].id.starts_with("sec_"));
        assert!(catalog.sections[0].topics[0].id.starts_with("t_"));
    }

    #[test]
    fn non_array_document_is_rejected() {
        assert!(parse_catalog(r#"{"sections":[]}"#).is_err());
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn profile_without_links_gets_empty_links() {
        let profile = parse_profile(r#"{"name":"Ada","picture":"p.png"}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.picture, "p.png");
        assert!(profile.links.github.is_empty());

        let defaulted = parse_profile("{}").unwrap();
        assert_eq!(defaulted.name, "Srikar");
    }
}
