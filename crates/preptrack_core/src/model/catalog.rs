//! Catalog domain model.
//!
//! # Responsibility
//! - Define the section → topic → subtopic tree tracked by the user.
//! - Provide the status cycle and the first-run seed catalog.
//!
//! # Invariants
//! - Every topic belongs to exactly one section, every subtopic to exactly
//!   one topic (owned `Vec`s, no sharing).
//! - `id` values never change after creation.
//! - Sequence order is significant and preserved by serialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for sections, topics and subtopics.
pub type EntityId = String;

/// Decorative color tag given to sections created at runtime.
pub const NEW_SECTION_COLOR: &str = "from-indigo-400 to-indigo-600";

/// Id prefix for generated section ids.
pub const SECTION_ID_PREFIX: &str = "sec";
/// Id prefix for generated topic ids.
pub const TOPIC_ID_PREFIX: &str = "t";
/// Id prefix for generated subtopic ids.
pub const SUBTOPIC_ID_PREFIX: &str = "s";

/// Completion state for topics and subtopics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started.
    #[default]
    Todo,
    /// Completed.
    Done,
    /// Completed but flagged for another pass.
    Revise,
}

impl Status {
    /// Returns the next status in the fixed `todo → done → revise` cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Done => Self::Revise,
            Self::Revise => Self::Todo,
        }
    }

    /// Stable lowercase label, identical to the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Done => "done",
            Self::Revise => "revise",
        }
    }

    /// Badge glyph shown on the status toggle.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Todo => "",
            Self::Done => "✓",
            Self::Revise => "!",
        }
    }

    /// Parses a persisted label. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "done" => Some(Self::Done),
            "revise" => Some(Self::Revise),
            _ => None,
        }
    }
}

/// Leaf trackable unit owned by one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: EntityId,
    pub title: String,
    pub status: Status,
    pub notes: String,
}

impl Subtopic {
    /// Creates a `todo` subtopic with a generated id and empty notes.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(SUBTOPIC_ID_PREFIX),
            title: title.into(),
            status: Status::Todo,
            notes: String::new(),
        }
    }
}

/// Trackable unit owned by one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: EntityId,
    pub title: String,
    pub status: Status,
    pub notes: String,
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    /// Creates a `todo` topic with a generated id, empty notes and no
    /// subtopics.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(TOPIC_ID_PREFIX),
            title: title.into(),
            status: Status::Todo,
            notes: String::new(),
            subtopics: Vec::new(),
        }
    }

    /// Looks up one subtopic by id.
    pub fn subtopic(&self, subtopic_id: &str) -> Option<&Subtopic> {
        self.subtopics.iter().find(|sub| sub.id == subtopic_id)
    }
}

/// Top-level grouping of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub title: String,
    /// Decorative tag, opaque to core logic.
    pub color: String,
    pub topics: Vec<Topic>,
}

impl Section {
    /// Creates an empty section with a generated id and the runtime color.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(SECTION_ID_PREFIX),
            title: title.into(),
            color: NEW_SECTION_COLOR.to_string(),
            topics: Vec::new(),
        }
    }

    /// Looks up one topic by id.
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == topic_id)
    }
}

/// Full ordered tree of sections.
///
/// Serialized transparently as a JSON array of sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub sections: Vec<Section>,
}

impl Catalog {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Built-in catalog used when nothing usable is persisted.
    pub fn seed() -> Self {
        Self::new(vec![
            Section {
                id: "dsa".to_string(),
                title: "DSA / Algorithms".to_string(),
                color: "from-purple-500 to-indigo-500".to_string(),
                topics: vec![Topic {
                    subtopics: vec![
                        Subtopic::new("Two pointers & sliding window"),
                        Subtopic::new("String parsing & pattern match"),
                    ],
                    ..Topic::new("Arrays & Strings")
                }],
            },
            Section {
                id: "java".to_string(),
                title: "Java & Backend".to_string(),
                color: "from-green-400 to-teal-500".to_string(),
                topics: vec![Topic {
                    subtopics: vec![Subtopic::new("Collections deep-dive")],
                    ..Topic::new("Core OOP & Collections")
                }],
            },
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up one section by id.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn first_section_id(&self) -> Option<&str> {
        self.sections.first().map(|section| section.id.as_str())
    }

    /// Total topic count across every section.
    pub fn topic_count(&self) -> usize {
        self.sections.iter().map(|section| section.topics.len()).sum()
    }

    /// Iterates every topic in catalog order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.sections.iter().flat_map(|section| section.topics.iter())
    }
}

/// Generates an opaque id of the form `<prefix>_<random>`.
pub fn generate_id(prefix: &str) -> EntityId {
    let random = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &random[..12])
}
