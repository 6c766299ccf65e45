//! Status API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use project_hub::application::dto::FlashKind;
use project_hub::domain::{MemberRole, Repository};

use crate::common::{assert_redirect, json_body, TestApp};

fn names(body: &Value) -> Vec<String> {
    body["statuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["status_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_new_statuses_go_to_the_end() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.seed_status("Started", 0).await;
    app.seed_status("Completed", 1).await;

    let response = app.post_form("/statuses", "status_name=On+Hold", Some(&token)).await;

    let flash = assert_redirect(&response, "/statuses").unwrap();
    assert_eq!(flash.message, "Status 'On Hold' was added");

    let body: Value = json_body(app.get("/statuses", Some(&token)).await).await;
    assert_eq!(names(&body), vec!["Started", "Completed", "On Hold"]);
    assert_eq!(body["statuses"][2]["sort_order"], 2);
}

#[tokio::test]
async fn test_explicit_sort_order_is_respected() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.seed_status("Started", 5).await;

    app.post_form("/statuses", "status_name=Backlog&sort_order=1", Some(&token))
        .await;

    let body: Value = json_body(app.get("/statuses", Some(&token)).await).await;
    assert_eq!(names(&body), vec!["Backlog", "Started"]);
}

#[tokio::test]
async fn test_duplicate_status_name_is_refused() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.seed_status("Started", 0).await;

    let response = app.post_form("/statuses", "status_name=started", Some(&token)).await;

    let flash = assert_redirect(&response, "/statuses").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "A status named 'started' already exists");
}

#[tokio::test]
async fn test_rename_keeps_sort_order() {
    let app = TestApp::new();
    let token = app.admin().await;
    let status = app.seed_status("Started", 3).await;

    let response = app
        .post_form(
            &format!("/statuses/{}", status.id),
            "status_name=In+Progress",
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/statuses").unwrap();
    assert_eq!(flash.message, "Status 'In Progress' was updated");

    let stored = app.repos.statuses.get_by_id(status.id).await.unwrap();
    assert_eq!(stored.status_name, "In Progress");
    assert_eq!(stored.sort_order, 3);
}

#[tokio::test]
async fn test_get_status_envelope() {
    let app = TestApp::new();
    let token = app.admin().await;
    let status = app.seed_status("Started", 0).await;

    let found = app.get(&format!("/statuses/{}", status.id), Some(&token)).await;
    assert_eq!(found.status(), StatusCode::OK);
    let body: Value = json_body(found).await;
    assert_eq!(body["result"]["status_name"], "Started");

    let missing = app.get("/statuses/7", Some(&token)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(missing).await;
    assert_eq!(body["error"], "Status with id 7 was not found");
}

#[tokio::test]
async fn test_status_in_use_cannot_be_deleted() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;
    let status = app.seed_status("Started", 0).await;
    app.seed_project("Website", &client, &status).await;

    let response = app
        .post_form(&format!("/statuses/{}/delete", status.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/statuses").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(
        flash.message,
        "Status 'Started' is used by projects and cannot be deleted"
    );
}

#[tokio::test]
async fn test_delete_unused_status() {
    let app = TestApp::new();
    let token = app.admin().await;
    let status = app.seed_status("Archived", 9).await;

    let response = app
        .post_form(&format!("/statuses/{}/delete", status.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/statuses").unwrap();
    assert_eq!(flash.message, "Status was deleted");
    assert!(app.repos.statuses.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_regular_member_cannot_manage_statuses() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(MemberRole::User).await;

    let response = app.post_form("/statuses", "status_name=Backlog", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
