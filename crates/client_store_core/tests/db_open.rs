use client_store_core::db::{ensure_table, open_db, open_db_in_memory, table_exists, TableName};
use client_store_core::{Client, ClientFields, ClientId, ClientRepository, SqliteClientRepository};

#[test]
fn ensure_table_creates_configured_table() {
    let conn = open_db_in_memory().unwrap();
    let table = TableName::parse("Clients").unwrap();

    assert!(!table_exists(&conn, &table).unwrap());
    ensure_table(&conn, &table).unwrap();
    assert!(table_exists(&conn, &table).unwrap());
}

#[test]
fn ensure_table_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let table = TableName::parse("Clients").unwrap();

    ensure_table(&conn, &table).unwrap();
    ensure_table(&conn, &table).unwrap();
    assert!(table_exists(&conn, &table).unwrap());
}

#[test]
fn ensure_table_accepts_names_with_dots_and_dashes() {
    let conn = open_db_in_memory().unwrap();
    let table = TableName::parse("clients-dev.v2").unwrap();

    ensure_table(&conn, &table).unwrap();
    assert!(table_exists(&conn, &table).unwrap());
}

#[test]
fn records_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clients.db");
    let table = TableName::parse("Clients").unwrap();
    let client = Client::with_id(
        ClientId::from("persisted"),
        ClientFields::new("Alice", "a@x.com", "555"),
    );

    let first = open_db(&path).unwrap();
    ensure_table(&first, &table).unwrap();
    SqliteClientRepository::new(&first, table.clone())
        .put_client(&client)
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    ensure_table(&second, &table).unwrap();
    let loaded = SqliteClientRepository::new(&second, table)
        .get_client(&client.client_id)
        .unwrap();
    assert_eq!(loaded, Some(client));
}
