use super::*;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::protocol::ListUsersResponse;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct DirectoryState {
    users: Arc<Mutex<Vec<UserRecord>>>,
    next_id: Arc<Mutex<i64>>,
}

async fn handle_list(State(state): State<DirectoryState>) -> Json<ListUsersResponse> {
    let data = state.users.lock().await.clone();
    Json(ListUsersResponse { data })
}

async fn handle_create(
    State(state): State<DirectoryState>,
    Json(fields): Json<UserFields>,
) -> Json<UserRecord> {
    let mut next_id = state.next_id.lock().await;
    let record = UserRecord {
        id: UserId(*next_id),
        name: fields.name,
        email: fields.email,
    };
    *next_id += 1;
    state.users.lock().await.push(record.clone());
    Json(record)
}

async fn handle_update(
    State(state): State<DirectoryState>,
    Path(id): Path<i64>,
    Json(fields): Json<UserFields>,
) -> Result<Json<UserRecord>, StatusCode> {
    let mut users = state.users.lock().await;
    let Some(user) = users.iter_mut().find(|user| user.id == UserId(id)) else {
        return Err(StatusCode::NOT_FOUND);
    };
    user.name = fields.name;
    user.email = fields.email;
    Ok(Json(user.clone()))
}

async fn handle_delete(State(state): State<DirectoryState>, Path(id): Path<i64>) -> StatusCode {
    let mut users = state.users.lock().await;
    let before = users.len();
    users.retain(|user| user.id != UserId(id));
    if users.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_directory_server(initial: Vec<UserRecord>) -> Result<(String, DirectoryState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let next_id = initial.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;
    let state = DirectoryState {
        users: Arc::new(Mutex::new(initial)),
        next_id: Arc::new(Mutex::new(next_id)),
    };
    let app = Router::new()
        .route("/api/users", get(handle_list).post(handle_create))
        .route(
            "/api/users/:id",
            axum::routing::put(handle_update).delete(handle_delete),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

/// Server where every route answers 500, simulating a failing backend.
async fn spawn_failing_server() -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn record(id: i64, name: &str, email: &str) -> UserRecord {
    UserRecord {
        id: UserId(id),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn fields(name: &str, email: &str) -> UserFields {
    UserFields {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn refresh_replaces_cached_state_wholesale() {
    let (server_url, state) = spawn_directory_server(vec![record(1, "Ann", "a@x.com")])
        .await
        .expect("spawn server");
    let mut controller = UserListController::new(server_url);

    controller.refresh().await;
    assert_eq!(controller.users(), &[record(1, "Ann", "a@x.com")]);

    // Another client adds a record; the next refresh must pick it up whole.
    state
        .users
        .lock()
        .await
        .push(record(2, "Bo", "b@x.com"));
    controller.refresh().await;
    assert_eq!(
        controller.users(),
        &[record(1, "Ann", "a@x.com"), record(2, "Bo", "b@x.com")]
    );
}

#[tokio::test]
async fn refresh_twice_without_mutations_is_idempotent() {
    let (server_url, _state) = spawn_directory_server(vec![
        record(1, "Ann", "a@x.com"),
        record(2, "Bo", "b@x.com"),
    ])
    .await
    .expect("spawn server");
    let mut controller = UserListController::new(server_url);

    controller.refresh().await;
    let first = controller.users().to_vec();
    controller.refresh().await;
    assert_eq!(controller.users(), first.as_slice());
}

#[tokio::test]
async fn refresh_failure_keeps_cached_state() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.users = vec![record(1, "Ann", "a@x.com")];

    controller.refresh().await;

    assert_eq!(controller.users(), &[record(1, "Ann", "a@x.com")]);
}

#[tokio::test]
async fn create_appends_server_record_clears_draft_and_refetches() {
    let (server_url, _state) = spawn_directory_server(vec![record(1, "Ann", "a@x.com")])
        .await
        .expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.refresh().await;

    controller.set_create_draft(fields("Bo", "b@x.com"));
    controller.create().await;

    assert_eq!(controller.users().len(), 2);
    assert_eq!(controller.users()[1], record(2, "Bo", "b@x.com"));
    assert_eq!(controller.create_draft(), &UserFields::default());
}

#[tokio::test]
async fn create_sends_empty_fields_verbatim() {
    let (server_url, state) = spawn_directory_server(Vec::new())
        .await
        .expect("spawn server");
    let mut controller = UserListController::new(server_url);

    controller.set_create_draft(UserFields::default());
    controller.create().await;

    let stored = state.users.lock().await.clone();
    assert_eq!(stored, vec![record(1, "", "")]);
}

#[tokio::test]
async fn create_failure_keeps_collection_and_draft() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.users = vec![record(1, "Ann", "a@x.com")];
    let before = controller.users().to_vec();

    controller.set_create_draft(fields("Bo", "b@x.com"));
    controller.create().await;

    assert_eq!(controller.users(), before.as_slice());
    assert_eq!(controller.create_draft(), &fields("Bo", "b@x.com"));
}

#[tokio::test]
async fn select_for_edit_copies_fields_without_network() {
    // Unroutable URL, so no server can answer; the assertions below only
    // check that the draft was populated locally.
    let mut controller = UserListController::new("http://127.0.0.1:9");
    let ann = record(1, "Ann", "a@x.com");

    controller.select_for_edit(&ann);

    let draft = controller.update_draft().expect("update draft");
    assert_eq!(draft.id, UserId(1));
    assert_eq!(draft.fields, fields("Ann", "a@x.com"));
}

#[tokio::test]
async fn confirm_update_replaces_only_the_matching_record() {
    let (server_url, _state) = spawn_directory_server(vec![
        record(1, "Ann", "a@x.com"),
        record(2, "Bo", "b@x.com"),
    ])
    .await
    .expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.refresh().await;

    let bo = controller.users()[1].clone();
    controller.select_for_edit(&bo);
    controller.set_update_fields(fields("Bobby", "b@x.com"));
    controller.confirm_update().await;

    assert_eq!(
        controller.users(),
        &[record(1, "Ann", "a@x.com"), record(2, "Bobby", "b@x.com")]
    );
    assert!(controller.update_draft().is_none());
}

#[tokio::test]
async fn confirm_update_without_draft_is_a_no_op() {
    let mut controller = UserListController::new("http://127.0.0.1:9");
    controller.users = vec![record(1, "Ann", "a@x.com")];

    controller.confirm_update().await;

    assert_eq!(controller.users(), &[record(1, "Ann", "a@x.com")]);
}

#[tokio::test]
async fn update_failure_keeps_collection_and_draft() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.users = vec![record(2, "Bo", "b@x.com")];
    let before = controller.users().to_vec();

    controller.select_for_edit(&before[0]);
    controller.set_update_fields(fields("Bobby", "b@x.com"));
    controller.confirm_update().await;

    assert_eq!(controller.users(), before.as_slice());
    let draft = controller.update_draft().expect("draft kept");
    assert_eq!(draft.fields, fields("Bobby", "b@x.com"));
}

#[tokio::test]
async fn confirm_delete_removes_record_and_clears_selection() {
    let (server_url, state) = spawn_directory_server(vec![
        record(1, "Ann", "a@x.com"),
        record(2, "Bo", "b@x.com"),
    ])
    .await
    .expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.refresh().await;

    let bo = controller.users()[1].clone();
    controller.request_delete(&bo);
    controller.confirm_delete().await;

    assert_eq!(controller.users(), &[record(1, "Ann", "a@x.com")]);
    assert!(controller.delete_selection().is_none());
    assert_eq!(
        state.users.lock().await.clone(),
        vec![record(1, "Ann", "a@x.com")]
    );
}

#[tokio::test]
async fn delete_failure_keeps_collection_and_selection() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let mut controller = UserListController::new(server_url);
    controller.users = vec![record(2, "Bo", "b@x.com")];
    let before = controller.users().to_vec();

    controller.request_delete(&before[0]);
    controller.confirm_delete().await;

    assert_eq!(controller.users(), before.as_slice());
    assert_eq!(controller.delete_selection(), Some(&record(2, "Bo", "b@x.com")));
}

#[tokio::test]
async fn cancel_paths_clear_pending_state_without_network() {
    let mut controller = UserListController::new("http://127.0.0.1:9");
    let ann = record(1, "Ann", "a@x.com");
    controller.users = vec![ann.clone()];

    controller.select_for_edit(&ann);
    controller.cancel_update();
    assert!(controller.update_draft().is_none());

    controller.request_delete(&ann);
    controller.cancel_delete();
    assert!(controller.delete_selection().is_none());

    assert_eq!(controller.users(), &[ann]);
}

#[tokio::test]
async fn delete_ignores_whatever_body_the_server_returns() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/api/users/:id",
        axum::routing::delete(|| async { (StatusCode::OK, "gone") }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let api = UsersApi::new(format!("http://{addr}"));
    api.delete(UserId(7)).await.expect("delete succeeds");
}

#[tokio::test]
async fn non_2xx_status_is_a_remote_call_failure() {
    let server_url = spawn_failing_server().await.expect("spawn server");
    let api = UsersApi::new(server_url);

    let err = api.list().await.expect_err("must fail");
    assert!(err.to_string().contains("remote call failed"));
}
