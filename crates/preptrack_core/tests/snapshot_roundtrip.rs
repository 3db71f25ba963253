use preptrack_core::db::open_db;
use preptrack_core::{
    Catalog, KeyValueStore, PersistenceGateway, Section, SqliteKvStore, Status, Subtopic, Topic,
    CATALOG_KEY,
};

fn rich_catalog() -> Catalog {
    let mut graphs = Topic::new("Graphs");
    graphs.status = Status::Revise;
    graphs.notes = "Dijkstra ✓\n  Bellman-Ford pending".to_string();
    graphs.subtopics = vec![Subtopic::new("BFS"), Subtopic::new("Topological sort")];
    graphs.subtopics[1].status = Status::Done;
    graphs.subtopics[1].notes = "Kahn's algorithm".to_string();

    let mut dp = Topic::new("Dynamic Programming");
    dp.status = Status::Done;

    let mut algorithms = Section::new("Algorithms");
    algorithms.topics = vec![dp, graphs];

    Catalog::new(vec![algorithms, Section::new("Empty section")])
}

#[test]
fn catalog_survives_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.db");
    let catalog = rich_catalog();

    {
        let conn = open_db(&path).unwrap();
        let gateway = PersistenceGateway::new(SqliteKvStore::try_new(&conn).unwrap());
        gateway.save_catalog(&catalog).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let gateway = PersistenceGateway::new(SqliteKvStore::try_new(&conn).unwrap());
    assert_eq!(gateway.load_catalog(), Some(catalog));
}

#[test]
fn persisted_layout_uses_plain_json_fields() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("layout.db")).unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let gateway = PersistenceGateway::new(SqliteKvStore::try_new(&conn).unwrap());
    gateway.save_catalog(&rich_catalog()).unwrap();

    let raw = store.load(CATALOG_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let sections = value.as_array().unwrap();
    assert_eq!(sections.len(), 2);

    let topic = &sections[0]["topics"][1];
    assert_eq!(topic["title"], "Graphs");
    assert_eq!(topic["status"], "revise");
    assert_eq!(topic["subtopics"][1]["status"], "done");
    assert!(sections[1]["topics"].as_array().unwrap().is_empty());
    assert_eq!(sections[1]["color"], "from-indigo-400 to-indigo-600");
}
