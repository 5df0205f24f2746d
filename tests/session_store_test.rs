//! Session store integration tests against the file slot

mod common;

use std::fs;

use tempfile::TempDir;

use studyshare::config::{SessionBackend, SessionConfig};
use studyshare::session::{FileSlot, SessionStore};

use common::session;

fn file_store(dir: &TempDir) -> SessionStore {
    SessionStore::new(Box::new(FileSlot::new(dir.path().join("session.json"))))
}

#[test]
fn test_saved_session_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let mut store = file_store(&dir);
    store.save(session("t1")).unwrap();

    let mut reopened = file_store(&dir);
    assert_eq!(reopened.current(), None);
    assert_eq!(reopened.load(), Some(session("t1")));
    assert_eq!(reopened.current(), Some(&session("t1")));
}

#[test]
fn test_persisted_blob_uses_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.save(session("t1")).unwrap();

    let blob = fs::read_to_string(dir.path().join("session.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["displayName"], "Asha");
    assert_eq!(value["token"], "t1");
}

#[test]
fn test_save_replaces_previous_session() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.save(session("t1")).unwrap();
    store.save(session("t2")).unwrap();

    assert_eq!(file_store(&dir).load().map(|s| s.token), Some("t2".to_string()));
}

#[test]
fn test_clear_removes_file_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.save(session("t1")).unwrap();

    store.clear().unwrap();
    assert!(!dir.path().join("session.json").exists());
    assert_eq!(store.current(), None);
    assert_eq!(store.load(), None);

    store.clear().expect("second clear should also succeed");
}

#[test]
fn test_garbage_file_loads_as_absent() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("session.json"), "{not json").unwrap();

    let mut store = file_store(&dir);
    assert_eq!(store.load(), None);
    assert!(store.require("see saved uploads").is_err());
}

#[test]
fn test_blob_without_token_loads_as_absent() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("session.json"),
        r#"{"id":"u1","displayName":"Asha","token":""}"#,
    )
    .unwrap();

    assert_eq!(file_store(&dir).load(), None);
}

#[test]
fn test_empty_token_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    assert!(store.save(session("")).is_err());
    assert!(!dir.path().join("session.json").exists());
    assert_eq!(store.current(), None);
}

#[test]
fn test_open_with_configured_path() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig {
        backend: SessionBackend::File,
        path: Some(dir.path().join("nested").join("session.json")),
        key: "user".to_string(),
    };

    let mut store = SessionStore::open(&config).unwrap();
    store.save(session("t1")).unwrap();

    assert!(store.location().contains("session.json"));
    assert_eq!(SessionStore::open(&config).unwrap().load(), Some(session("t1")));
}
