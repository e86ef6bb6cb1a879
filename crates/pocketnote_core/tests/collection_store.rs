use pocketnote_core::db::open_db_in_memory;
use pocketnote_core::{
    CollectionStore, Group, GroupId, KeyValueStore, MemoryKeyValueStore, Note, NoteEngine,
    NoteId, SqliteKeyValueStore,
};

fn sample_collection() -> Vec<Group> {
    let mut work = Group::new(GroupId::new("g-1"), "Work");
    work.notes.push(Note::new(
        NoteId::new("n-1"),
        "Buy milk",
        "3/5/2024, 9:07:02 AM",
    ));
    work.notes.push(Note::new(
        NoteId::new("n-2"),
        "  spaced  ",
        "3/5/2024, 9:08:10 AM",
    ));
    vec![work, Group::new(GroupId::new("g-2"), "Personal")]
}

#[test]
fn save_then_load_returns_equal_collection() {
    let mut store = CollectionStore::new(MemoryKeyValueStore::new());
    let collection = sample_collection();

    store.save(&collection).unwrap();
    assert_eq!(store.load().unwrap(), collection);
}

#[test]
fn save_then_load_through_sqlite_returns_equal_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut store = CollectionStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let collection = sample_collection();

    store.save(&collection).unwrap();
    assert_eq!(store.load().unwrap(), collection);
}

#[test]
fn load_from_empty_store_is_empty() {
    let store = CollectionStore::new(MemoryKeyValueStore::new());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn load_degrades_corrupt_data_to_empty() {
    for raw in ["not json", "{\"id\":1}", "[{\"name\":\"no id\"}]"] {
        let mut backend = MemoryKeyValueStore::new();
        backend.set("groups", raw).unwrap();
        let store = CollectionStore::new(backend);
        assert!(
            store.load().unwrap().is_empty(),
            "raw value `{raw}` should load empty"
        );
    }
}

#[test]
fn engine_over_corrupt_data_starts_empty_and_overwrites_on_commit() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set("groups", "{{{").unwrap();
    let mut engine = NoteEngine::open(CollectionStore::new(backend)).unwrap();
    assert!(engine.groups().is_empty());

    engine.create_group("Work").unwrap();
    assert_eq!(engine.store().load().unwrap().len(), 1);
}

#[test]
fn stored_document_uses_expected_field_names() {
    let mut store = CollectionStore::new(MemoryKeyValueStore::new());
    store.save(&sample_collection()).unwrap();

    let raw = store.backend().get("groups").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let group = &json[0];
    assert_eq!(group["id"], "g-1");
    assert_eq!(group["name"], "Work");
    assert_eq!(group["color"], "#ffffff");
    assert_eq!(group["notes"][0]["id"], "n-1");
    assert_eq!(group["notes"][0]["text"], "Buy milk");
    assert_eq!(group["notes"][0]["createdAt"], "3/5/2024, 9:07:02 AM");
    assert!(group["notes"][0].get("created_at").is_none());
}

#[test]
fn load_accepts_timestamp_ids_and_missing_optional_fields() {
    let raw = r##"[
        {"id":"1700000000000","name":"Legacy","color":"#ff0000","notes":[
            {"id":"1700000000500","text":"old note","createdAt":"11/14/2023, 10:13:20 PM"}
        ]},
        {"id":"1700000001000","name":"Bare"}
    ]"##;
    let mut backend = MemoryKeyValueStore::new();
    backend.set("groups", raw).unwrap();

    let loaded = CollectionStore::new(backend).load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id.as_str(), "1700000000000");
    assert_eq!(loaded[0].color, "#ff0000");
    assert_eq!(loaded[0].notes[0].text, "old note");
    assert_eq!(loaded[1].color, "#ffffff");
    assert!(loaded[1].notes.is_empty());
}

#[test]
fn custom_key_isolates_collections() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set("groups", "[]").unwrap();

    let mut store = CollectionStore::with_key(backend, "groups-archive");
    store.save(&sample_collection()).unwrap();

    assert_eq!(store.key(), "groups-archive");
    let backend = store.into_backend();
    assert_eq!(backend.get("groups").unwrap().as_deref(), Some("[]"));
    assert!(backend.get("groups-archive").unwrap().is_some());
}
