use preptrack_core::db::open_db_in_memory;
use preptrack_core::{
    topic_collection_id, DropEvent, DropLocation, KeyValueStore, KvError, KvResult,
    LinkKind, PersistenceGateway, ProfileField, ReorderOutcome, SqliteKvStore, Status,
    TrackerStore, CATALOG_KEY, PROFILE_KEY,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn open(conn: &Connection) -> TrackerStore<SqliteKvStore<'_>> {
    let store = SqliteKvStore::try_new(conn).unwrap();
    TrackerStore::open(PersistenceGateway::new(store))
}

fn persisted(conn: &Connection, key: &str) -> Option<String> {
    SqliteKvStore::try_new(conn).unwrap().load(key).unwrap()
}

fn first_topic(store: &TrackerStore<SqliteKvStore<'_>>) -> (String, String) {
    let section = &store.catalog().sections[0];
    (section.id.clone(), section.topics[0].id.clone())
}

#[test]
fn first_run_seeds_and_persists_defaults() {
    let conn = setup();
    let store = open(&conn);

    assert_eq!(store.catalog().sections.len(), 2);
    assert_eq!(store.selected_section_id(), Some("dsa"));
    assert_eq!(store.profile().name, "Srikar");
    assert!(persisted(&conn, CATALOG_KEY).is_some());
    assert!(persisted(&conn, PROFILE_KEY).is_some());
}

#[test]
fn reopening_restores_persisted_state() {
    let conn = setup();
    let (section_id, topic_id) = {
        let mut store = open(&conn);
        let (section_id, topic_id) = first_topic(&store);
        store.toggle_topic_status(&section_id, &topic_id);
        store.update_topic_notes(&section_id, &topic_id, "review monotonic stack");
        store.update_profile_field(ProfileField::Name, "Ada");
        (section_id, topic_id)
    };

    let reopened = open(&conn);
    let topic = reopened
        .catalog()
        .section(&section_id)
        .and_then(|section| section.topic(&topic_id))
        .unwrap();
    assert_eq!(topic.status, Status::Done);
    assert_eq!(topic.notes, "review monotonic stack");
    assert_eq!(reopened.profile().name, "Ada");
}

#[test]
fn open_backfills_only_missing_slots() {
    let conn = setup();
    let stored = r#"[{"id":"os","title":"Operating Systems","color":"c","topics":[]}]"#;
    SqliteKvStore::try_new(&conn)
        .unwrap()
        .save(CATALOG_KEY, stored)
        .unwrap();

    let store = open(&conn);
    assert_eq!(store.catalog().sections[0].id, "os");
    assert_eq!(persisted(&conn, CATALOG_KEY).as_deref(), Some(stored));
    assert!(persisted(&conn, PROFILE_KEY).unwrap().contains("Srikar"));
}

#[test]
fn corrupt_catalog_falls_back_to_seed() {
    let conn = setup();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    kv.save(CATALOG_KEY, "[{\"id\": 42}").unwrap();

    let store = open(&conn);
    assert_eq!(store.catalog().sections.len(), 2);
    assert_eq!(store.catalog().sections[0].id, "dsa");
}

#[test]
fn partially_shaped_catalog_is_normalized_on_open() {
    let conn = setup();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    kv.save(
        CATALOG_KEY,
        r#"[{"id":"os","title":"Operating Systems","topics":[{"id":"t1","title":"Paging"}]}]"#,
    )
    .unwrap();

    let store = open(&conn);
    let topic = &store.catalog().sections[0].topics[0];
    assert_eq!(topic.status, Status::Todo);
    assert_eq!(topic.notes, "");
    assert!(topic.subtopics.is_empty());
    assert_eq!(store.selected_section_id(), Some("os"));
}

#[test]
fn select_section_falls_back_to_first() {
    let conn = setup();
    let mut store = open(&conn);

    store.select_section("java");
    assert_eq!(store.selected_section_id(), Some("java"));
    store.select_section("nope");
    assert_eq!(store.selected_section_id(), Some("dsa"));
}

#[test]
fn empty_catalog_has_no_selection() {
    let conn = setup();
    SqliteKvStore::try_new(&conn)
        .unwrap()
        .save(CATALOG_KEY, "[]")
        .unwrap();

    let mut store = open(&conn);
    assert_eq!(store.selected_section_id(), None);
    store.select_section("dsa");
    assert_eq!(store.selected_section_id(), None);
    assert_eq!(store.overall_progress(), 0);
}

#[test]
fn add_section_appends_and_selects_it() {
    let conn = setup();
    let mut store = open(&conn);

    assert_eq!(store.add_section("   "), None);
    assert_eq!(store.selected_section_id(), Some("dsa"));

    let added = store.add_section(" System Design ").unwrap();
    assert_eq!(store.selected_section_id(), Some(added.as_str()));
    let section = store.selected_section().unwrap();
    assert_eq!(section.title, "System Design");
    assert!(section.topics.is_empty());
    assert_eq!(store.section_progress(&added), Some(0));
}

#[test]
fn blank_adds_leave_catalog_unchanged() {
    let conn = setup();
    let mut store = open(&conn);
    let before = store.catalog().clone();
    let (section_id, topic_id) = first_topic(&store);

    assert!(!store.add_topic(&section_id, ""));
    assert!(!store.add_topic(&section_id, "   "));
    assert!(!store.add_subtopic(&section_id, &topic_id, " "));
    assert_eq!(store.add_section(""), None);
    assert_eq!(store.catalog(), &before);
}

#[test]
fn removal_requires_confirmation_token() {
    let conn = setup();
    let mut store = open(&conn);
    let (section_id, topic_id) = first_topic(&store);

    let request = store.request_remove_topic(&section_id, &topic_id).unwrap();
    assert_eq!(request.topic_title(), "Arrays & Strings");
    assert!(store.catalog().section(&section_id).unwrap().topic(&topic_id).is_some());

    assert!(store.confirm_remove_topic(request));
    assert!(store.catalog().topics().all(|topic| topic.id != topic_id));
    assert!(store.request_remove_topic(&section_id, &topic_id).is_none());
    assert!(!store.toggle_topic_status(&section_id, &topic_id));

    let saved = persisted(&conn, CATALOG_KEY).unwrap();
    assert!(!saved.contains(&topic_id));
}

#[test]
fn stale_removal_request_is_a_no_op() {
    let conn = setup();
    let mut store = open(&conn);
    let (section_id, topic_id) = first_topic(&store);

    let first = store.request_remove_topic(&section_id, &topic_id).unwrap();
    let second = first.clone();
    assert!(store.confirm_remove_topic(first));
    assert!(!store.confirm_remove_topic(second));
}

#[test]
fn progress_tracks_latest_snapshot() {
    let conn = setup();
    let mut store = open(&conn);
    let (section_id, topic_id) = first_topic(&store);
    let sub_ids: Vec<String> = store.catalog().sections[0].topics[0]
        .subtopics
        .iter()
        .map(|sub| sub.id.clone())
        .collect();

    assert_eq!(store.section_progress(&section_id), Some(0));
    store.toggle_topic_status(&section_id, &topic_id);
    assert_eq!(store.section_progress(&section_id), Some(67));
    store.toggle_subtopic_status(&section_id, &topic_id, &sub_ids[0]);
    assert_eq!(store.section_progress(&section_id), Some(83));
    store.toggle_topic_status(&section_id, &topic_id);
    store.toggle_subtopic_status(&section_id, &topic_id, &sub_ids[1]);
    assert_eq!(store.section_progress(&section_id), Some(60));

    // dsa topic weight 0.9 + java topic weight 0.0 over 3.0
    assert_eq!(store.overall_progress(), 30);
    assert_eq!(store.section_progress("missing"), None);
}

#[test]
fn drag_within_section_moves_topic() {
    let conn = setup();
    let mut store = open(&conn);
    store.add_topic("dsa", "Linked Lists");
    store.add_topic("dsa", "Trees");

    let outcome = store.move_topic(&DropEvent {
        source: DropLocation {
            collection_id: topic_collection_id("dsa"),
            index: 0,
        },
        destination: Some(DropLocation {
            collection_id: topic_collection_id("dsa"),
            index: 2,
        }),
    });
    assert!(outcome.is_applied());

    let titles: Vec<_> = store.catalog().sections[0]
        .topics
        .iter()
        .map(|topic| topic.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Linked Lists", "Trees", "Arrays & Strings"]);
}

#[test]
fn cross_section_drag_is_rejected_visibly() {
    let conn = setup();
    let mut store = open(&conn);
    let before = store.catalog().clone();

    let outcome = store.move_topic(&DropEvent {
        source: DropLocation {
            collection_id: topic_collection_id("dsa"),
            index: 0,
        },
        destination: Some(DropLocation {
            collection_id: topic_collection_id("java"),
            index: 0,
        }),
    });
    assert_eq!(
        outcome,
        ReorderOutcome::CrossSection {
            source_section: "dsa".to_string(),
            destination_section: "java".to_string(),
        }
    );
    assert_eq!(store.catalog(), &before);
}

#[test]
fn profile_links_persist_independently_of_catalog() {
    let conn = setup();
    let mut store = open(&conn);
    let catalog_before = persisted(&conn, CATALOG_KEY);

    store.update_profile_link(LinkKind::Leetcode, "https://leetcode.com/u/ada");
    assert_eq!(store.profile().links.leetcode, "https://leetcode.com/u/ada");
    assert_eq!(persisted(&conn, CATALOG_KEY), catalog_before);
    assert!(persisted(&conn, PROFILE_KEY)
        .unwrap()
        .contains("https://leetcode.com/u/ada"));
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn save(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::MissingRequiredTable("kv_entries"))
    }

    fn load(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::MissingRequiredTable("kv_entries"))
    }
}

#[test]
fn storage_failures_never_block_the_session() {
    let mut store = TrackerStore::open(PersistenceGateway::new(FailingStore));
    assert_eq!(store.catalog().sections[0].id, "dsa");
    assert_eq!(store.catalog().sections[1].id, "java");

    assert!(store.add_topic("java", "Streams"));
    assert_eq!(store.catalog().sections[1].topics.len(), 2);
}

