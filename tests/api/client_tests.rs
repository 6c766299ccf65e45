//! Client API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use project_hub::application::dto::FlashKind;
use project_hub::domain::{MemberRole, Repository};

use crate::common::{assert_redirect, json_body, TestApp};

#[tokio::test]
async fn test_add_client_then_list() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app
        .post_form(
            "/clients",
            "client_name=+Acme+Corp+&email=hello%40acme.test&phone=&location=Berlin",
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "Client 'Acme Corp' was added");

    let page = app.get("/clients", Some(&token)).await;
    assert_eq!(page.status(), StatusCode::OK);
    let body: Value = json_body(page).await;
    let clients = body["clients"].as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["client_name"], "Acme Corp");
    assert_eq!(clients[0]["email"], "hello@acme.test");
    assert!(clients[0]["phone"].is_null());
    assert_eq!(body["current_member"]["role"], "admin");
}

#[tokio::test]
async fn test_clients_are_listed_by_name() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.seed_client("Zenith").await;
    app.seed_client("Acme").await;
    app.seed_client("Midway").await;

    let body: Value = json_body(app.get("/clients", Some(&token)).await).await;

    let names: Vec<&str> = body["clients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme", "Midway", "Zenith"]);
}

#[tokio::test]
async fn test_duplicate_client_name_is_refused_ignoring_case() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.seed_client("Acme").await;

    let response = app.post_form("/clients", "client_name=ACME", Some(&token)).await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "A client named 'ACME' already exists");
    assert_eq!(app.repos.clients.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_client_form_is_refused() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app
        .post_form("/clients", "client_name=Acme&email=not-an-email", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.message, "Enter a valid email address");
    assert!(app.repos.clients.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_client_envelope() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;

    let response = app.get(&format!("/clients/{}", client.id), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["succeeded"], true);
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["result"]["id"], client.id.to_string());
    assert_eq!(body["result"]["client_name"], "Acme");
}

#[tokio::test]
async fn test_get_missing_client_is_not_found() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app.get("/clients/42", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response).await;
    assert_eq!(body["succeeded"], false);
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["error"], "Client with id 42 was not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app.get("/clients/abc", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_client() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;

    let response = app
        .post_form(
            &format!("/clients/{}", client.id),
            "client_name=Acme+GmbH&location=Hamburg",
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.message, "Client 'Acme GmbH' was updated");

    let stored = app.repos.clients.get_by_id(client.id).await.unwrap();
    assert_eq!(stored.client_name, "Acme GmbH");
    assert_eq!(stored.location.as_deref(), Some("Hamburg"));
    assert_eq!(stored.created_at, client.created_at);
}

#[tokio::test]
async fn test_update_keeping_own_name_is_allowed() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;

    let response = app
        .post_form(&format!("/clients/{}", client.id), "client_name=acme", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
}

#[tokio::test]
async fn test_update_missing_client_flashes_not_found() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app.post_form("/clients/42", "client_name=Acme", Some(&token)).await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Client with id 42 was not found");
}

#[tokio::test]
async fn test_delete_client() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;

    let response = app
        .post_form(&format!("/clients/{}/delete", client.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.message, "Client was deleted");
    assert!(app.repos.clients.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_with_projects_cannot_be_deleted() {
    let app = TestApp::new();
    let token = app.admin().await;
    let client = app.seed_client("Acme").await;
    let status = app.seed_status("Started", 0).await;
    app.seed_project("Website", &client, &status).await;

    let response = app
        .post_form(&format!("/clients/{}/delete", client.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/clients").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Client 'Acme' has projects and cannot be deleted");
    assert!(app.repos.clients.get_by_id(client.id).await.is_ok());
}

#[tokio::test]
async fn test_regular_member_cannot_manage_clients() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(MemberRole::User).await;

    let page = app.get("/clients", Some(&token)).await;
    assert_eq!(page.status(), StatusCode::FORBIDDEN);

    let add = app.post_form("/clients", "client_name=Acme", Some(&token)).await;
    assert_eq!(add.status(), StatusCode::FORBIDDEN);
    assert!(app.repos.clients.get_all().await.unwrap().is_empty());
}
