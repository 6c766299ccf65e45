//! Project API Tests
//!
//! Projects are open to every signed-in member, not only administrators.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use project_hub::application::dto::FlashKind;
use project_hub::domain::{Client, MemberRole, ProjectRepository, Repository, Status};

use crate::common::{assert_redirect, json_body, TestApp};

struct Fixture {
    app: TestApp,
    token: String,
    client: Client,
    started: Status,
    completed: Status,
}

async fn fixture() -> Fixture {
    let app = TestApp::new();
    let (_, token) = app.signed_in(MemberRole::User).await;
    let client = app.seed_client("Acme").await;
    let started = app.seed_status("Started", 0).await;
    let completed = app.seed_status("Completed", 1).await;
    Fixture {
        app,
        token,
        client,
        started,
        completed,
    }
}

fn project_form(name: &str, client: &Client, extra: &str) -> String {
    format!(
        "project_name={}&start_date=2024-03-01&client_id={}{}",
        name, client.id, extra
    )
}

#[tokio::test]
async fn test_add_project_with_default_status_and_members() {
    let f = fixture().await;
    let (grace, _) = f.app.signed_in(MemberRole::User).await;

    let response = f
        .app
        .post_form(
            "/projects",
            &project_form(
                "Website",
                &f.client,
                &format!("&budget=1200&end_date=2024-06-30&member_ids={}", grace.id),
            ),
            Some(&f.token),
        )
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "Project 'Website' was added");

    let body: Value = json_body(f.app.get("/projects", Some(&f.token)).await).await;
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    let website = &projects[0];
    assert_eq!(website["client_name"], "Acme");
    assert_eq!(website["status_name"], "Started");
    assert_eq!(website["budget"], 1200);
    assert_eq!(website["end_date"], "2024-06-30");
    assert_eq!(website["members"][0]["id"], grace.id.to_string());

    // lookup lists for the add/edit forms
    assert_eq!(body["statuses"].as_array().unwrap().len(), 2);
    assert_eq!(body["clients"].as_array().unwrap().len(), 1);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
    assert_eq!(body["current_member"]["role"], "user");
}

#[tokio::test]
async fn test_filter_projects_by_status() {
    let f = fixture().await;
    f.app.seed_project("Website", &f.client, &f.started).await;
    f.app.seed_project("Brochure", &f.client, &f.completed).await;

    let response = f
        .app
        .get(&format!("/projects?status={}", f.completed.id), Some(&f.token))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["project_name"], "Brochure");
    assert_eq!(body["selected_status"], f.completed.id.to_string());
}

#[tokio::test]
async fn test_blank_status_filter_lists_everything() {
    let f = fixture().await;
    f.app.seed_project("Website", &f.client, &f.started).await;
    f.app.seed_project("Brochure", &f.client, &f.completed).await;

    let body: Value = json_body(f.app.get("/projects?status=", Some(&f.token)).await).await;

    assert_eq!(body["projects"].as_array().unwrap().len(), 2);
    assert!(body["selected_status"].is_null());
}

#[tokio::test]
async fn test_end_before_start_is_refused() {
    let f = fixture().await;

    let response = f
        .app
        .post_form(
            "/projects",
            &project_form("Website", &f.client, "&end_date=2024-01-01"),
            Some(&f.token),
        )
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "End date cannot be before the start date");
    assert!(f.app.repos.projects.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_client_is_refused() {
    let f = fixture().await;
    let ghost = Client {
        id: 404,
        ..Default::default()
    };

    let response = f
        .app
        .post_form("/projects", &project_form("Website", &ghost, ""), Some(&f.token))
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.message, "Select an existing client");
}

#[tokio::test]
async fn test_unknown_member_is_refused() {
    let f = fixture().await;

    let response = f
        .app
        .post_form(
            "/projects",
            &project_form("Website", &f.client, "&member_ids=12345"),
            Some(&f.token),
        )
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.message, "One or more selected members do not exist");
}

#[tokio::test]
async fn test_project_needs_a_status_to_exist() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(MemberRole::User).await;
    let client = app.seed_client("Acme").await;

    let response = app
        .post_form("/projects", &project_form("Website", &client, ""), Some(&token))
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.message, "Add a status before adding projects");
}

#[tokio::test]
async fn test_malformed_form_is_flashed() {
    let f = fixture().await;

    let response = f
        .app
        .post_form(
            "/projects",
            "project_name=Website&start_date=yesterday",
            Some(&f.token),
        )
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert!(flash.message.starts_with("The submitted form is invalid"));
}

#[tokio::test]
async fn test_update_project_replaces_members_and_keeps_status() {
    let f = fixture().await;
    let (ada, _) = f.app.signed_in(MemberRole::User).await;
    let (grace, _) = f.app.signed_in(MemberRole::User).await;
    let project = f.app.seed_project("Website", &f.client, &f.completed).await;
    f.app
        .repos
        .projects
        .set_members(project.id, &[ada.id])
        .await
        .unwrap();

    let response = f
        .app
        .post_form(
            &format!("/projects/{}", project.id),
            &project_form(
                "Website+v2",
                &f.client,
                &format!("&member_ids={}", grace.id),
            ),
            Some(&f.token),
        )
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.message, "Project 'Website v2' was updated");

    let body: Value =
        json_body(f.app.get(&format!("/projects/{}", project.id), Some(&f.token)).await).await;
    let result = &body["result"];
    assert_eq!(result["project_name"], "Website v2");
    assert_eq!(result["status_name"], "Completed");
    let members = result["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"], grace.id.to_string());
    assert_eq!(
        f.app.repos.projects.member_ids(project.id).await.unwrap(),
        vec![grace.id]
    );
}

#[tokio::test]
async fn test_move_project_to_another_status() {
    let f = fixture().await;
    let project = f.app.seed_project("Website", &f.client, &f.started).await;

    f.app
        .post_form(
            &format!("/projects/{}", project.id),
            &project_form(
                "Website",
                &f.client,
                &format!("&status_id={}", f.completed.id),
            ),
            Some(&f.token),
        )
        .await;

    let stored = f.app.repos.projects.get_by_id(project.id).await.unwrap();
    assert_eq!(stored.status_id, f.completed.id);
}

#[tokio::test]
async fn test_get_missing_project_is_not_found() {
    let f = fixture().await;

    let response = f.app.get("/projects/99", Some(&f.token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response).await;
    assert_eq!(body["succeeded"], false);
    assert_eq!(body["error"], "Project with id 99 was not found");
}

#[tokio::test]
async fn test_delete_project() {
    let f = fixture().await;
    let project = f.app.seed_project("Website", &f.client, &f.started).await;

    let response = f
        .app
        .post_form(&format!("/projects/{}/delete", project.id), "", Some(&f.token))
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.message, "Project was deleted");
    assert!(f.app.repos.projects.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_project_flashes_not_found() {
    let f = fixture().await;

    let response = f
        .app
        .post_form("/projects/99/delete", "", Some(&f.token))
        .await;

    let flash = assert_redirect(&response, "/projects").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "Project with id 99 was not found");
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let f = fixture().await;
    let response = f
        .app
        .post_form("/projects", &project_form("Website", &f.client, ""), Some(&f.token))
        .await;
    let flash_cookie = crate::common::set_cookie(&response, "flash")
        .unwrap()
        .into_owned();

    let request = axum::http::Request::builder()
        .uri("/projects")
        .header(
            axum::http::header::COOKIE,
            format!("session={}; flash={}", f.token, flash_cookie.value()),
        )
        .body(axum::body::Body::empty())
        .unwrap();
    let page = f.app.send(request).await;

    let cleared = crate::common::set_cookie(&page, "flash").expect("flash removal");
    assert!(cleared.value().is_empty());
    let body: Value = json_body(page).await;
    assert_eq!(body["flash"]["kind"], "success");
    assert_eq!(body["flash"]["message"], "Project 'Website' was added");
}
