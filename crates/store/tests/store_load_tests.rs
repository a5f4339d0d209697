//! Full-load and archived-load behaviour: success, the empty-plus-error
//! failure contract, and the events both publish.

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use flowdeck_remote::RemoteError;
use flowdeck_store::{ProjectStore, StoreError};

use common::{project_json, server_error, unauthorized, ScriptedApi};

// ---------------------------------------------------------------------------
// Test: successful load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_populates_projects_and_marks_loaded() {
    let api = ScriptedApi::new();
    api.ok(
        "list_projects",
        json!([project_json(1, "Website"), project_json(2, "Launch")]),
    );
    let store = ProjectStore::new(api.clone());

    store.load().await.expect("load should succeed");

    let projects = store.projects().await;
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Website");
    assert!(store.is_loaded().await);
    assert_eq!(store.load_error().await, None);
    assert_eq!(store.revision().await, 1);
}

#[tokio::test]
async fn load_publishes_store_loaded() {
    let api = ScriptedApi::new();
    api.ok("list_projects", json!([project_json(1, "Website")]));
    let store = ProjectStore::new(api);
    let mut rx = store.subscribe();

    store.load().await.expect("load should succeed");

    let event = rx.recv().await.expect("should receive the load event");
    assert_eq!(event.event_type, "store.loaded");
    assert_eq!(event.entity_id, None);
    assert_eq!(event.revision, 1);
}

// ---------------------------------------------------------------------------
// Test: failed load empties the store and records the error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_failure_empties_store_and_records_error() {
    let api = ScriptedApi::new();
    api.ok("list_projects", json!([project_json(1, "Website")]));
    let store = ProjectStore::new(api.clone());
    store.load().await.expect("first load should succeed");
    assert_eq!(store.projects().await.len(), 1);

    api.err("list_projects", server_error("database is on fire"));
    let err = store.load().await.expect_err("second load should fail");

    assert_matches!(
        err,
        StoreError::Remote(RemoteError::Api { status: 500, .. })
    );
    // Stale data is dropped rather than shown.
    assert!(store.projects().await.is_empty());
    assert!(!store.is_loaded().await);
    let recorded = store.load_error().await.expect("error should be recorded");
    assert!(
        recorded.contains("database is on fire"),
        "recorded error should carry the message, got: {recorded}"
    );
}

#[tokio::test]
async fn load_failure_publishes_store_load_failed() {
    let api = ScriptedApi::new();
    api.err("list_projects", server_error("nope"));
    let store = ProjectStore::new(api);
    let mut rx = store.subscribe();

    store.load().await.expect_err("load should fail");

    let event = rx.recv().await.expect("should receive the failure event");
    assert_eq!(event.event_type, "store.load_failed");
}

#[tokio::test]
async fn successful_reload_clears_recorded_error() {
    let api = ScriptedApi::new();
    api.err("list_projects", server_error("temporary"));
    let store = ProjectStore::new(api.clone());
    store.load().await.expect_err("first load should fail");
    assert!(store.load_error().await.is_some());

    api.ok("list_projects", json!([project_json(1, "Website")]));
    store.load().await.expect("retry should succeed");

    assert_eq!(store.load_error().await, None);
    assert!(store.is_loaded().await);
    assert_eq!(store.projects().await.len(), 1);
}

#[tokio::test]
async fn rejected_session_is_distinguishable() {
    let api = ScriptedApi::new();
    api.err("list_projects", unauthorized());
    let store = ProjectStore::new(api);

    let err = store.load().await.expect_err("load should fail");

    assert!(err.is_unauthorized());
}

// ---------------------------------------------------------------------------
// Test: archived list loads independently of the board
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_archived_populates_archived_list() {
    let api = ScriptedApi::new();
    api.ok("list_projects", json!([project_json(1, "Website")]));
    let store = ProjectStore::new(api.clone());
    store.load().await.expect("load should succeed");

    let mut old = project_json(7, "Old Campaign");
    old["archived"] = json!(true);
    api.ok("list_archived_projects", json!([old]));
    store.load_archived().await.expect("archived load should succeed");

    let archived = store.archived().await;
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].id, 7);
    assert!(archived[0].archived);
    // The active board is untouched.
    assert_eq!(store.projects().await.len(), 1);
}

#[tokio::test]
async fn load_archived_failure_leaves_board_and_error_flag_alone() {
    let api = ScriptedApi::new();
    api.ok("list_projects", json!([project_json(1, "Website")]));
    let store = ProjectStore::new(api.clone());
    store.load().await.expect("load should succeed");

    api.err("list_archived_projects", server_error("nope"));
    store
        .load_archived()
        .await
        .expect_err("archived load should fail");

    assert_eq!(store.projects().await.len(), 1);
    assert!(store.is_loaded().await);
    assert_eq!(store.load_error().await, None);
    assert!(store.archived().await.is_empty());
}
