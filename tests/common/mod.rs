use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

use studyshare::commands::Context;
use studyshare::config::ApiConfig;
use studyshare::session::{MemorySlot, SessionStore};
use studyshare::{ApiClient, Session};

/// Client rooted at the mock server's `/api/v1` prefix.
#[allow(dead_code)]
pub fn api_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout_seconds: Some(5),
    };
    ApiClient::new(&config).expect("failed to build api client")
}

#[allow(dead_code)]
pub fn session(token: &str) -> Session {
    Session {
        id: "u1".to_string(),
        display_name: "Asha".to_string(),
        group: "CSE".to_string(),
        year: "2nd".to_string(),
        profile_pic_url: None,
        token: token.to_string(),
    }
}

/// Context with an in-memory session slot, optionally already logged in.
#[allow(dead_code)]
pub fn context(server: &MockServer, logged_in: Option<Session>) -> Context {
    let mut store = SessionStore::new(Box::new(MemorySlot::new()));
    if let Some(session) = logged_in {
        store.save(session).expect("failed to seed session");
    }
    Context::new(api_for(server), store)
}

/// Backend-shaped upload document.
#[allow(dead_code)]
pub fn upload_json(id: &str, subject: &str) -> Value {
    json!({
        "_id": id,
        "subject": subject,
        "group": "MPC",
        "year": "1st",
        "semester": "2",
        "imageUrl": format!("https://cdn.example.edu/{}.jpg", id),
        "user": "u1",
        "savedByCount": 0,
        "createdAt": "2024-02-01T10:00:00.000Z"
    })
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
