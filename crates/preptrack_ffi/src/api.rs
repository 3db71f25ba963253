//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose tracker use-cases to Dart via FRB as plain DTO envelopes.
//! - Keep the per-session section selection across stateless calls.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Each call is a self-contained open → load → mutate → save cycle, run
//!   while holding the process-wide session lock so overlapping calls never
//!   overwrite each other's snapshot.
//! - Destructive removal only happens through an explicit confirm call.

use log::warn;
use preptrack_core::db::open_db;
use preptrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    section_progress, DropEvent, DropLocation, LinkKind, MatchField, PersistenceGateway, Profile,
    ProfileField, Section, SqliteKvStore, TrackerConfig, TrackerStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static TRACKER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<SessionState> = Mutex::new(SessionState {
    selected_section_id: None,
});

/// UI session state kept between calls. Guarding it also serializes every
/// store cycle in this process.
struct SessionState {
    selected_section_id: Option<String>,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Repeating the call with the same `level + log_dir` is idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Subtopic row for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtopicView {
    pub id: String,
    pub title: String,
    /// `todo|done|revise`.
    pub status: String,
    /// Badge glyph for the status toggle.
    pub glyph: String,
    pub notes: String,
}

/// Topic card for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicView {
    pub id: String,
    pub title: String,
    pub status: String,
    pub glyph: String,
    pub notes: String,
    pub subtopics: Vec<SubtopicView>,
}

/// Section with derived progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub color: String,
    /// Drop-target id for this section's topic list.
    pub collection_id: String,
    pub progress: u8,
    pub topics: Vec<TopicView>,
}

/// Profile card values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub picture: String,
    /// Picture to render, with placeholder fallback applied.
    pub display_picture: String,
    pub github: String,
    pub linkedin: String,
    pub leetcode: String,
    pub gfg: String,
}

/// Full render snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub sections: Vec<SectionView>,
    pub selected_section_id: Option<String>,
    pub overall_progress: u8,
    pub profile: ProfileView,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerActionResponse {
    /// Whether the call reached the store.
    pub ok: bool,
    /// Whether state changed. `false` for no-ops such as blank titles.
    pub changed: bool,
    /// Stable reason code for rejected drags; empty otherwise.
    pub reason: String,
    /// Human-readable diagnostics.
    pub message: String,
    /// Snapshot after the call; `None` when the store could not be opened.
    pub snapshot: Option<TrackerSnapshot>,
}

/// Confirmation prompt for a topic removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPromptResponse {
    pub found: bool,
    /// Prompt text to show, empty when the topic does not exist.
    pub prompt: String,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSearchItem {
    pub section_id: String,
    pub topic_id: String,
    pub subtopic_id: Option<String>,
    pub title: String,
    /// `title|notes`.
    pub matched_field: String,
}

/// Loads the current snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_snapshot() -> TrackerActionResponse {
    respond("tracker_snapshot", |_| (false, String::new()))
}

/// Selects the active section (unknown ids fall back to the first one).
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_select_section(section_id: String) -> TrackerActionResponse {
    respond("tracker_select_section", |store| {
        let before = store.selected_section_id().map(str::to_string);
        store.select_section(&section_id);
        (before.as_deref() != store.selected_section_id(), String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_section(title: String) -> TrackerActionResponse {
    respond("tracker_add_section", |store| {
        (store.add_section(&title).is_some(), String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_topic(section_id: String, title: String) -> TrackerActionResponse {
    respond("tracker_add_topic", |store| {
        (store.add_topic(&section_id, &title), String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_subtopic(
    section_id: String,
    topic_id: String,
    title: String,
) -> TrackerActionResponse {
    respond("tracker_add_subtopic", |store| {
        (store.add_subtopic(&section_id, &topic_id, &title), String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_toggle_topic(section_id: String, topic_id: String) -> TrackerActionResponse {
    respond("tracker_toggle_topic", |store| {
        (store.toggle_topic_status(&section_id, &topic_id), String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_toggle_subtopic(
    section_id: String,
    topic_id: String,
    subtopic_id: String,
) -> TrackerActionResponse {
    respond("tracker_toggle_subtopic", |store| {
        (
            store.toggle_subtopic_status(&section_id, &topic_id, &subtopic_id),
            String::new(),
        )
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_update_topic_notes(
    section_id: String,
    topic_id: String,
    notes: String,
) -> TrackerActionResponse {
    respond("tracker_update_topic_notes", |store| {
        (
            store.update_topic_notes(&section_id, &topic_id, &notes),
            String::new(),
        )
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_update_subtopic_notes(
    section_id: String,
    topic_id: String,
    subtopic_id: String,
    notes: String,
) -> TrackerActionResponse {
    respond("tracker_update_subtopic_notes", |store| {
        (
            store.update_subtopic_notes(&section_id, &topic_id, &subtopic_id, &notes),
            String::new(),
        )
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_rename_topic(
    section_id: String,
    topic_id: String,
    title: String,
) -> TrackerActionResponse {
    respond("tracker_rename_topic", |store| {
        (store.rename_topic(&section_id, &topic_id, &title), String::new())
    })
}

/// First step of removal: returns the prompt the UI must show.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_request_remove_topic(section_id: String, topic_id: String) -> RemovalPromptResponse {
    let prompt = with_store(|store| {
        store
            .request_remove_topic(&section_id, &topic_id)
            .map(|request| format!("Remove topic \"{}\"?", request.topic_title()))
    });
    match prompt {
        Ok(Some(prompt)) => RemovalPromptResponse {
            found: true,
            prompt,
        },
        Ok(None) => RemovalPromptResponse {
            found: false,
            prompt: String::new(),
        },
        Err(err) => {
            warn!("event=ffi_call module=ffi op=tracker_request_remove_topic status=error error={err}");
            RemovalPromptResponse {
                found: false,
                prompt: String::new(),
            }
        }
    }
}

/// Second step of removal. Nothing is removed unless `confirmed` is true.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_confirm_remove_topic(
    section_id: String,
    topic_id: String,
    confirmed: bool,
) -> TrackerActionResponse {
    respond("tracker_confirm_remove_topic", |store| {
        if !confirmed {
            return (false, "cancelled".to_string());
        }
        match store.request_remove_topic(&section_id, &topic_id) {
            Some(request) => (store.confirm_remove_topic(request), String::new()),
            None => (false, String::new()),
        }
    })
}

/// Applies a drag gesture. `destination_collection_id = None` means the
/// item was dropped outside any target.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_move_topic(
    source_collection_id: String,
    source_index: u32,
    destination_collection_id: Option<String>,
    destination_index: u32,
) -> TrackerActionResponse {
    let event = DropEvent {
        source: DropLocation {
            collection_id: source_collection_id,
            index: source_index as usize,
        },
        destination: destination_collection_id.map(|collection_id| DropLocation {
            collection_id,
            index: destination_index as usize,
        }),
    };
    respond("tracker_move_topic", |store| {
        let outcome = store.move_topic(&event);
        let reason = if outcome.is_applied() {
            String::new()
        } else {
            outcome.code().to_string()
        };
        (outcome.is_applied(), reason)
    })
}

/// Searches topic and subtopic titles/notes.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_search(query: String) -> Vec<TrackerSearchItem> {
    let hits = with_store(|store| store.search(&query));
    match hits {
        Ok(hits) => hits
            .into_iter()
            .map(|hit| TrackerSearchItem {
                section_id: hit.section_id,
                topic_id: hit.topic_id,
                subtopic_id: hit.subtopic_id,
                title: hit.title,
                matched_field: match hit.field {
                    MatchField::Title => "title",
                    MatchField::Notes => "notes",
                }
                .to_string(),
            })
            .collect(),
        Err(err) => {
            warn!("event=ffi_call module=ffi op=tracker_search status=error error={err}");
            Vec::new()
        }
    }
}

/// Updates `name` or `picture`.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_update_profile_field(field: String, value: String) -> TrackerActionResponse {
    let Some(field) = ProfileField::parse(&field) else {
        return TrackerActionResponse::failure(format!("unknown profile field `{field}`"));
    };
    respond("tracker_update_profile_field", |store| {
        let before = store.profile().clone();
        store.update_profile_field(field, &value);
        (&before != store.profile(), String::new())
    })
}

/// Updates `github`, `linkedin`, `leetcode` or `gfg`.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_update_profile_link(kind: String, value: String) -> TrackerActionResponse {
    let Some(kind) = LinkKind::parse(&kind) else {
        return TrackerActionResponse::failure(format!("unknown profile link `{kind}`"));
    };
    respond("tracker_update_profile_link", |store| {
        let before = store.profile().clone();
        store.update_profile_link(kind, &value);
        (&before != store.profile(), String::new())
    })
}

type SessionStore<'conn> = TrackerStore<SqliteKvStore<'conn>>;

impl TrackerActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            reason: String::new(),
            message: message.into(),
            snapshot: None,
        }
    }
}

fn respond(
    op: &'static str,
    f: impl FnOnce(&mut SessionStore<'_>) -> (bool, String),
) -> TrackerActionResponse {
    let result = with_store(|store| {
        let (changed, reason) = f(store);
        (changed, reason, to_snapshot(store))
    });
    match result {
        Ok((changed, reason, snapshot)) => TrackerActionResponse {
            ok: true,
            changed,
            message: if changed {
                "Saved.".to_string()
            } else if reason.is_empty() {
                "No change.".to_string()
            } else {
                format!("No change: {reason}.")
            },
            reason,
            snapshot: Some(snapshot),
        },
        Err(err) => TrackerActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn with_store<T>(f: impl FnOnce(&mut SessionStore<'_>) -> T) -> Result<T, String> {
    let mut session = SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let conn = open_db(resolve_tracker_db_path())
        .map_err(|err| format!("tracker DB open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn)
        .map_err(|err| format!("tracker store init failed: {err}"))?;
    let mut store = TrackerStore::open(PersistenceGateway::new(kv));

    if let Some(section_id) = session.selected_section_id.as_deref() {
        store.select_section(section_id);
    }
    let value = f(&mut store);
    session.selected_section_id = store.selected_section_id().map(str::to_string);
    Ok(value)
}

fn resolve_tracker_db_path() -> PathBuf {
    TRACKER_DB_PATH
        .get_or_init(|| TrackerConfig::from_env().db_path)
        .clone()
}

fn to_snapshot(store: &SessionStore<'_>) -> TrackerSnapshot {
    TrackerSnapshot {
        sections: store.catalog().sections.iter().map(to_section_view).collect(),
        selected_section_id: store.selected_section_id().map(str::to_string),
        overall_progress: store.overall_progress(),
        profile: to_profile_view(store.profile()),
    }
}

fn to_section_view(section: &Section) -> SectionView {
    SectionView {
        id: section.id.clone(),
        title: section.title.clone(),
        color: section.color.clone(),
        collection_id: preptrack_core::topic_collection_id(&section.id),
        progress: section_progress(section),
        topics: section
            .topics
            .iter()
            .map(|topic| TopicView {
                id: topic.id.clone(),
                title: topic.title.clone(),
                status: topic.status.label().to_string(),
                glyph: topic.status.glyph().to_string(),
                notes: topic.notes.clone(),
                subtopics: topic
                    .subtopics
                    .iter()
                    .map(|sub| SubtopicView {
                        id: sub.id.clone(),
                        title: sub.title.clone(),
                        status: sub.status.label().to_string(),
                        glyph: sub.status.glyph().to_string(),
                        notes: sub.notes.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn to_profile_view(profile: &Profile) -> ProfileView {
    ProfileView {
        name: profile.name.clone(),
        picture: profile.picture.clone(),
        display_picture: profile.display_picture().to_string(),
        github: profile.links.github.clone(),
        linkedin: profile.links.linkedin.clone(),
        leetcode: profile.links.leetcode.clone(),
        gfg: profile.links.gfg.clone(),
    }
}
