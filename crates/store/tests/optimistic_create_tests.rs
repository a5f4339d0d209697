//! Optimistic create flows for all four entity kinds: provisional
//! insert, canonical swap on confirmation, full removal on rollback,
//! and validation failures that never touch the tree.

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use flowdeck_core::note::{CreateComment, CreateNote};
use flowdeck_core::project::CreateProject;
use flowdeck_core::task::CreateTask;
use flowdeck_core::types::is_temp;
use flowdeck_core::CoreError;
use flowdeck_store::StoreError;

use common::{
    comment_json, loaded_store, note_json, project_json, server_error, task_json, ScriptedApi,
};

fn new_task(project_id: i64, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        title: title.to_string(),
        responsible: None,
        due_date: None,
    }
}

// ---------------------------------------------------------------------------
// Test: create_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_project_swaps_provisional_for_canonical() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([])).await;
    let mut rx = store.subscribe();

    api.ok("create_project", project_json(50, "New Project"));
    let created = store
        .create_project(CreateProject {
            name: "New Project".to_string(),
            color: "#10b981".to_string(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 50);
    let projects = store.projects().await;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, 50);
    assert!(!projects[0].pending);

    // Provisional insert first, canonical confirmation second.
    let optimistic = rx.recv().await.expect("optimistic event");
    assert_eq!(optimistic.event_type, "project.created");
    assert_eq!(optimistic.entity_id, Some(-1));
    assert!(is_temp(optimistic.entity_id.unwrap()));
    let confirmed = rx.recv().await.expect("confirmation event");
    assert_eq!(confirmed.event_type, "project.created.confirmed");
    assert_eq!(confirmed.entity_id, Some(50));
}

#[tokio::test]
async fn create_project_rollback_restores_previous_tree() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([project_json(1, "Website")])).await;
    let before = store.projects().await;
    let mut rx = store.subscribe();

    api.err("create_project", server_error("quota exceeded"));
    let err = store
        .create_project(CreateProject {
            name: "Another".to_string(),
            color: "#10b981".to_string(),
        })
        .await
        .expect_err("create should fail");

    assert_eq!(err.to_string(), "Server error (500): quota exceeded");
    assert_eq!(store.projects().await, before);

    assert_eq!(rx.recv().await.unwrap().event_type, "project.created");
    let rollback = rx.recv().await.expect("rollback event");
    assert_eq!(rollback.event_type, "project.created.rollback");
    assert_eq!(rollback.entity_id, Some(-1));
}

#[tokio::test]
async fn create_project_rejects_invalid_input_before_patching() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([])).await;
    let revision = store.revision().await;

    let err = store
        .create_project(CreateProject {
            name: "   ".to_string(),
            color: "#10b981".to_string(),
        })
        .await
        .expect_err("blank name should be rejected");
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));

    let err = store
        .create_project(CreateProject {
            name: "Fine".to_string(),
            color: "red".to_string(),
        })
        .await
        .expect_err("non-hex color should be rejected");
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));

    // No patch, no backend call.
    assert_eq!(store.revision().await, revision);
    assert_eq!(api.calls(), vec!["list_projects"]);
}

// ---------------------------------------------------------------------------
// Test: create_task
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_task_lands_in_its_project_with_canonical_id() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([project_json(1, "Website")])).await;

    api.ok("create_task", task_json(100, 1, "Ship it"));
    let created = store
        .create_task(new_task(1, "Ship it"))
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 100);
    let project = store.project(1).await.expect("project exists");
    assert_eq!(project.tasks.len(), 1);
    assert_eq!(project.tasks[0].id, 100);
    assert_eq!(project.tasks[0].title, "Ship it");
    assert!(!project.tasks[0].pending);
}

#[tokio::test]
async fn create_task_in_unknown_project_fails_locally() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([project_json(1, "Website")])).await;

    let err = store
        .create_task(new_task(99, "Orphan"))
        .await
        .expect_err("unknown project should fail");

    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity: "project", id: 99 })
    );
    // The backend was never asked.
    assert_eq!(api.calls(), vec!["list_projects"]);
}

#[tokio::test]
async fn create_task_rollback_removes_provisional_row() {
    let api = ScriptedApi::new();
    let mut project = project_json(1, "Website");
    project["tasks"] = json!([task_json(10, 1, "Existing")]);
    let store = loaded_store(api.clone(), json!([project])).await;
    let before = store.projects().await;

    api.err("create_task", server_error("rejected"));
    store
        .create_task(new_task(1, "Doomed"))
        .await
        .expect_err("create should fail");

    assert_eq!(store.projects().await, before);
}

#[tokio::test]
async fn provisional_ids_descend_across_operations() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([project_json(1, "Website")])).await;
    let mut rx = store.subscribe();

    api.ok("create_task", task_json(100, 1, "First"));
    api.ok("create_task", task_json(101, 1, "Second"));
    store.create_task(new_task(1, "First")).await.expect("ok");
    store.create_task(new_task(1, "Second")).await.expect("ok");

    assert_eq!(rx.recv().await.unwrap().entity_id, Some(-1));
    assert_eq!(rx.recv().await.unwrap().entity_id, Some(100));
    assert_eq!(rx.recv().await.unwrap().entity_id, Some(-2));
    assert_eq!(rx.recv().await.unwrap().entity_id, Some(101));
}

// ---------------------------------------------------------------------------
// Test: create_comment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_comment_appends_to_thread_then_reconciles() {
    let api = ScriptedApi::new();
    let mut project = project_json(1, "Website");
    project["tasks"] = json!([task_json(10, 1, "Write copy")]);
    let store = loaded_store(api.clone(), json!([project])).await;

    api.ok("create_comment", comment_json(500, 10, "Looks good"));
    let created = store
        .create_comment(
            1,
            CreateComment {
                task_id: 10,
                text: "Looks good".to_string(),
            },
        )
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 500);
    let project = store.project(1).await.expect("project exists");
    let comments = &project.tasks[0].comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, 500);
    assert_eq!(comments[0].author.as_deref(), Some("dana"));
}

#[tokio::test]
async fn create_comment_rollback_restores_thread() {
    let api = ScriptedApi::new();
    let mut task = task_json(10, 1, "Write copy");
    task["comments"] = json!([comment_json(400, 10, "First draft done")]);
    let mut project = project_json(1, "Website");
    project["tasks"] = json!([task]);
    let store = loaded_store(api.clone(), json!([project])).await;
    let before = store.projects().await;

    api.err("create_comment", server_error("rejected"));
    store
        .create_comment(
            1,
            CreateComment {
                task_id: 10,
                text: "Doomed".to_string(),
            },
        )
        .await
        .expect_err("create should fail");

    assert_eq!(store.projects().await, before);
}

#[tokio::test]
async fn create_comment_rejects_blank_text() {
    let api = ScriptedApi::new();
    let mut project = project_json(1, "Website");
    project["tasks"] = json!([task_json(10, 1, "Write copy")]);
    let store = loaded_store(api.clone(), json!([project])).await;

    let err = store
        .create_comment(
            1,
            CreateComment {
                task_id: 10,
                text: "  \n ".to_string(),
            },
        )
        .await
        .expect_err("blank text should be rejected");

    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
    assert_eq!(api.calls(), vec!["list_projects"]);
}

// ---------------------------------------------------------------------------
// Test: create_note
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_note_lands_on_its_project() {
    let api = ScriptedApi::new();
    let store = loaded_store(api.clone(), json!([project_json(1, "Website")])).await;

    api.ok("create_note", note_json(700, 1, "Kickoff summary"));
    let created = store
        .create_note(CreateNote {
            project_id: 1,
            text: "Kickoff summary".to_string(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 700);
    let project = store.project(1).await.expect("project exists");
    assert_eq!(project.notes.len(), 1);
    assert_eq!(project.notes[0].id, 700);
}

#[tokio::test]
async fn create_note_rollback_removes_provisional_row() {
    let api = ScriptedApi::new();
    let mut project = project_json(1, "Website");
    project["notes"] = json!([note_json(600, 1, "Keep me")]);
    let store = loaded_store(api.clone(), json!([project])).await;
    let before = store.projects().await;

    api.err("create_note", server_error("rejected"));
    store
        .create_note(CreateNote {
            project_id: 1,
            text: "Doomed".to_string(),
        })
        .await
        .expect_err("create should fail");

    assert_eq!(store.projects().await, before);
}
