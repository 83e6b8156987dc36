use leadboard_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version before"), 0);
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM leadboard_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, 1);
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn foreign_keys_are_enforced() {
    let store = Store::open_in_memory().expect("open in memory");
    let enabled: i64 = store
        .connection()
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .expect("pragma");
    assert_eq!(enabled, 1);
}
