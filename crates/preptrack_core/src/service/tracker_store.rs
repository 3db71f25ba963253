//! Tracker store: the single owner of session state.
//!
//! # Responsibility
//! - Hold the current catalog/profile snapshots and the selected section.
//! - Apply pure mutations, replace snapshots, and persist after each change.
//! - Gate destructive topic removal behind an explicit confirmation step.
//!
//! # Invariants
//! - Snapshots are only ever replaced, never edited in place.
//! - `selected_section_id` always names an existing section, or is `None`
//!   exactly when the catalog is empty.
//! - Persistence is fire-and-forget: a failed save is logged and the new
//!   snapshot stays in effect.

use crate::model::catalog::{Catalog, EntityId, Section};
use crate::model::profile::{LinkKind, Profile, ProfileField};
use crate::mutation::catalog_ops;
use crate::mutation::reorder::{apply_drop, DropEvent, ReorderOutcome};
use crate::progress::{overall_progress, section_progress, section_summaries, SectionSummary};
use crate::repo::gateway::PersistenceGateway;
use crate::repo::kv_repo::KeyValueStore;
use crate::search::topic_search::{search_topics, TopicHit};
use log::{debug, info, warn};

/// Confirmation token for a pending topic removal.
///
/// Only the store can mint one, and only for a topic that existed when the
/// request was made. Dropping the token cancels the removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    section_id: EntityId,
    topic_id: EntityId,
    topic_title: String,
}

impl RemovalRequest {
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    /// Title to show in the confirmation prompt.
    pub fn topic_title(&self) -> &str {
        &self.topic_title
    }
}

/// Session state owner over any key-value store.
pub struct TrackerStore<S: KeyValueStore> {
    gateway: PersistenceGateway<S>,
    catalog: Catalog,
    profile: Profile,
    selected_section_id: Option<EntityId>,
}

impl<S: KeyValueStore> TrackerStore<S> {
    /// Loads persisted state, falling back to the seed catalog and default
    /// profile when a slot is absent or unreadable.
    ///
    /// Defaults are written back immediately so the first run leaves both
    /// slots populated.
    pub fn open(gateway: PersistenceGateway<S>) -> Self {
        let loaded_catalog = gateway.load_catalog();
        let loaded_profile = gateway.load_profile();
        let seed_catalog = loaded_catalog.is_none();
        let default_profile = loaded_profile.is_none();

        let catalog = loaded_catalog.unwrap_or_else(Catalog::seed);
        let selected_section_id = catalog.first_section_id().map(str::to_string);
        let store = Self {
            gateway,
            catalog,
            profile: loaded_profile.unwrap_or_default(),
            selected_section_id,
        };

        if seed_catalog {
            store.persist_catalog("seed");
        }
        if default_profile {
            store.persist_profile("seed");
        }

        let catalog_source = if seed_catalog { "seed" } else { "persisted" };
        let profile_source = if default_profile { "default" } else { "persisted" };
        info!(
            "event=store_open module=store status=ok catalog_source={catalog_source} profile_source={profile_source} sections={} topics={}",
            store.catalog.sections.len(),
            store.catalog.topic_count()
        );
        store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section_id.as_deref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected_section_id
            .as_deref()
            .and_then(|id| self.catalog.section(id))
    }

    /// Progress of one section, `None` when the id does not resolve.
    pub fn section_progress(&self, section_id: &str) -> Option<u8> {
        self.catalog.section(section_id).map(section_progress)
    }

    pub fn overall_progress(&self) -> u8 {
        overall_progress(&self.catalog)
    }

    pub fn section_summaries(&self) -> Vec<SectionSummary> {
        section_summaries(&self.catalog)
    }

    pub fn search(&self, query: &str) -> Vec<TopicHit> {
        search_topics(&self.catalog, query)
    }

    /// Selects a section; unknown ids fall back to the first section.
    pub fn select_section(&mut self, section_id: &str) {
        self.selected_section_id = if self.catalog.section(section_id).is_some() {
            Some(section_id.to_string())
        } else {
            self.catalog.first_section_id().map(str::to_string)
        };
    }

    pub fn toggle_topic_status(&mut self, section_id: &str, topic_id: &str) -> bool {
        let next = catalog_ops::toggle_topic_status(&self.catalog, section_id, topic_id);
        self.commit_catalog("toggle_topic_status", next)
    }

    pub fn toggle_subtopic_status(
        &mut self,
        section_id: &str,
        topic_id: &str,
        subtopic_id: &str,
    ) -> bool {
        let next =
            catalog_ops::toggle_subtopic_status(&self.catalog, section_id, topic_id, subtopic_id);
        self.commit_catalog("toggle_subtopic_status", next)
    }

    pub fn update_topic_notes(&mut self, section_id: &str, topic_id: &str, notes: &str) -> bool {
        let next = catalog_ops::update_topic_notes(&self.catalog, section_id, topic_id, notes);
        self.commit_catalog("update_topic_notes", next)
    }

    pub fn update_subtopic_notes(
        &mut self,
        section_id: &str,
        topic_id: &str,
        subtopic_id: &str,
        notes: &str,
    ) -> bool {
        let next = catalog_ops::update_subtopic_notes(
            &self.catalog,
            section_id,
            topic_id,
            subtopic_id,
            notes,
        );
        self.commit_catalog("update_subtopic_notes", next)
    }

    pub fn add_topic(&mut self, section_id: &str, title: &str) -> bool {
        let next = catalog_ops::add_topic(&self.catalog, section_id, title);
        self.commit_catalog("add_topic", next)
    }

    pub fn add_subtopic(&mut self, section_id: &str, topic_id: &str, title: &str) -> bool {
        let next = catalog_ops::add_subtopic(&self.catalog, section_id, topic_id, title);
        self.commit_catalog("add_subtopic", next)
    }

    /// Appends a section and selects it. Returns the new section id.
    pub fn add_section(&mut self, title: &str) -> Option<EntityId> {
        let next = catalog_ops::add_section(&self.catalog, title);
        let added = (next.sections.len() > self.catalog.sections.len())
            .then(|| next.sections.last().map(|section| section.id.clone()))
            .flatten();
        self.commit_catalog("add_section", next);
        if let Some(section_id) = &added {
            self.select_section(section_id);
        }
        added
    }

    pub fn rename_topic(&mut self, section_id: &str, topic_id: &str, title: &str) -> bool {
        let next = catalog_ops::rename_topic(&self.catalog, section_id, topic_id, title);
        self.commit_catalog("rename_topic", next)
    }

    /// First step of topic removal: describes the target without touching
    /// state. Returns `None` when the topic does not exist.
    pub fn request_remove_topic(&self, section_id: &str, topic_id: &str) -> Option<RemovalRequest> {
        let topic = self.catalog.section(section_id)?.topic(topic_id)?;
        Some(RemovalRequest {
            section_id: section_id.to_string(),
            topic_id: topic.id.clone(),
            topic_title: topic.title.clone(),
        })
    }

    /// Second step of topic removal, applied only with a granted request.
    pub fn confirm_remove_topic(&mut self, request: RemovalRequest) -> bool {
        let next =
            catalog_ops::remove_topic(&self.catalog, &request.section_id, &request.topic_id);
        self.commit_catalog("remove_topic", next)
    }

    /// Moves a topic by index within one section.
    pub fn reorder_topics(&mut self, section_id: &str, from_index: usize, to_index: usize) -> bool {
        let next = catalog_ops::reorder_topics(&self.catalog, section_id, from_index, to_index);
        self.commit_catalog("reorder_topics", next)
    }

    /// Applies a drag gesture report and returns why it was or was not
    /// applied.
    pub fn move_topic(&mut self, event: &DropEvent) -> ReorderOutcome {
        let (next, outcome) = apply_drop(&self.catalog, event);
        if outcome.is_applied() {
            self.commit_catalog("move_topic", next);
        } else {
            debug!(
                "event=catalog_mutation module=store op=move_topic status=rejected reason={}",
                outcome.code()
            );
        }
        outcome
    }

    pub fn update_profile_field(&mut self, field: ProfileField, value: &str) {
        let next = self.profile.with_field(field, value);
        self.commit_profile("update_profile_field", next);
    }

    pub fn update_profile_link(&mut self, kind: LinkKind, value: &str) {
        let next = self.profile.with_link(kind, value);
        self.commit_profile("update_profile_link", next);
    }

    fn commit_catalog(&mut self, op: &'static str, next: Catalog) -> bool {
        if next == self.catalog {
            debug!("event=catalog_mutation module=store op={op} status=noop");
            return false;
        }

        self.catalog = next;
        self.revalidate_selection();
        debug!("event=catalog_mutation module=store op={op} status=ok");
        self.persist_catalog(op);
        true
    }

    fn commit_profile(&mut self, op: &'static str, next: Profile) {
        if next == self.profile {
            debug!("event=profile_mutation module=store op={op} status=noop");
            return;
        }

        self.profile = next;
        debug!("event=profile_mutation module=store op={op} status=ok");
        self.persist_profile(op);
    }

    fn revalidate_selection(&mut self) {
        let still_valid = self
            .selected_section_id
            .as_deref()
            .is_some_and(|id| self.catalog.section(id).is_some());
        if !still_valid {
            self.selected_section_id = self.catalog.first_section_id().map(str::to_string);
        }
    }

    fn persist_catalog(&self, op: &'static str) {
        if let Err(err) = self.gateway.save_catalog(&self.catalog) {
            warn!("event=snapshot_save module=store status=error slot=catalog op={op} error={err}");
        }
    }

    fn persist_profile(&self, op: &'static str) {
        if let Err(err) = self.gateway.save_profile(&self.profile) {
            warn!("event=snapshot_save module=store status=error slot=profile op={op} error={err}");
        }
    }
}
