//! End-to-end tests driving the real HTTP server over loopback.

use std::sync::Arc;
use std::time::Duration;

use tasknest::api::{self, AppState};
use tasknest::{
    Category, Config, LocalTaskCache, Priority, SqliteTaskStore, Status, TaskApi, TaskDraft,
    TaskManager, TaskPatch, TaskStore,
};

/// Boot the server on an ephemeral port with a fresh SQLite store.
/// Returns the temp dir (keep it alive) and the client base URL.
async fn spawn_server() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("tasks.db");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let config = Config::new("127.0.0.1".to_string(), addr.port(), db_path.clone());
    let store: Arc<dyn TaskStore> = Arc::new(SqliteTaskStore::new(db_path).await.expect("store"));
    let state = Arc::new(AppState { config, store });

    tokio::spawn(async move {
        axum::serve(listener, api::router(state))
            .await
            .expect("server");
    });

    (dir, format!("http://{}/api", addr))
}

#[tokio::test]
async fn create_list_update_delete_round_trip() {
    let (_dir, base_url) = spawn_server().await;
    let mut manager = TaskManager::new(TaskApi::new(base_url));

    // Pre-existing task so ordering is observable
    manager
        .create(TaskDraft::new("Older task"))
        .await
        .expect("create older");
    tokio::time::sleep(Duration::from_millis(5)).await;

    let mut draft = TaskDraft::new("Write report");
    draft.category = Category::Work;
    draft.priority = Priority::High;
    let created = manager.create(draft).await.expect("create");

    assert!(!created.id.is_empty());
    assert_eq!(created.title, "Write report");
    assert_eq!(created.status, Status::Pending);
    assert_eq!(created.created_at, created.updated_at);

    // Fresh load from the server: newest-created first
    manager.load_all().await.expect("load");
    assert_eq!(manager.tasks().len(), 2);
    assert_eq!(manager.tasks()[0].id, created.id);
    assert_eq!(manager.tasks()[1].title, "Older task");

    // Update confirms the merged record and bumps updated_at
    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = manager
        .update(&created.id, TaskPatch::status(Status::Completed))
        .await
        .expect("update")
        .expect("task exists");
    assert_eq!(updated.status, Status::Completed);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.title, "Write report");
    assert_eq!(manager.tasks()[0].status, Status::Completed);

    // Delete removes it everywhere
    assert!(manager.delete(&created.id).await.expect("delete"));
    manager.load_all().await.expect("reload");
    assert!(manager.tasks().iter().all(|t| t.id != created.id));
}

#[tokio::test]
async fn mutations_on_missing_ids_are_noops() {
    let (_dir, base_url) = spawn_server().await;
    let api = TaskApi::new(base_url);

    let updated = api
        .update("no-such-id", &TaskPatch::status(Status::Completed))
        .await
        .expect("update call");
    assert!(updated.is_none());

    let deleted = api.delete("no-such-id").await.expect("delete call");
    assert!(!deleted);
}

#[tokio::test]
async fn create_returns_201_with_native_id_and_defaults() {
    let (_dir, base_url) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/tasks", base_url))
        .json(&serde_json::json!({"title": "Defaults only"}))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let body: serde_json::Value = resp.json().await.expect("json");
    assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["category"], "work");
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let (_dir, base_url) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/tasks", base_url))
        .json(&serde_json::json!({"title": "   "}))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_acknowledges_with_a_message() {
    let (_dir, base_url) = spawn_server().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/tasks", base_url))
        .json(&serde_json::json!({"title": "Short-lived"}))
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    let id = created["_id"].as_str().expect("id");

    let resp = client
        .delete(format!("{}/tasks/{}", base_url, id))
        .send()
        .await
        .expect("delete");
    assert!(resp.status().is_success());

    let ack: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(ack["message"], "Task deleted");
}

#[tokio::test]
async fn manager_persists_to_the_local_fallback() {
    let (_dir, base_url) = spawn_server().await;
    let cache_dir = tempfile::tempdir().expect("cache dir");

    let mut manager = TaskManager::new(TaskApi::new(base_url))
        .with_cache(LocalTaskCache::new(cache_dir.path()));
    let created = manager
        .create(TaskDraft::new("Cached task"))
        .await
        .expect("create");

    // A second manager with the same cache restores the collection
    // without talking to the server.
    let mut offline = TaskManager::new(TaskApi::new("http://127.0.0.1:9/api"))
        .with_cache(LocalTaskCache::new(cache_dir.path()));
    offline.restore_local();
    assert_eq!(offline.tasks().len(), 1);
    assert_eq!(offline.tasks()[0], created);
}

#[tokio::test]
async fn failed_calls_leave_local_state_unchanged() {
    // Nothing listens on this port; every call is a transport fault.
    let mut manager = TaskManager::new(TaskApi::new("http://127.0.0.1:9/api"));

    assert!(manager.load_all().await.is_err());
    assert!(manager.tasks().is_empty());

    assert!(manager.create(TaskDraft::new("never lands")).await.is_err());
    assert!(manager.tasks().is_empty());
}
