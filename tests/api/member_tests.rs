//! Member API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use project_hub::application::dto::FlashKind;
use project_hub::domain::{Filter, MemberRole, ProjectRepository, Repository};

use crate::common::{assert_redirect, json_body, TestApp};

const GRACE: &str = "first_name=Grace&last_name=Hopper&email=grace%40example.com\
                     &job_title=Engineer&password=compiler1";

#[tokio::test]
async fn test_admin_adds_a_member() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app.post_form("/members", GRACE, Some(&token)).await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "Grace Hopper was added");

    let grace = app
        .repos
        .members
        .find(&Filter::eq_ignore_case("email", "grace@example.com"))
        .await
        .unwrap()
        .expect("member stored");
    assert_eq!(grace.role, MemberRole::User);
    assert_eq!(grace.job_title.as_deref(), Some("Engineer"));
    assert!(grace.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_member_list_never_exposes_password_hashes() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.post_form("/members", GRACE, Some(&token)).await;

    let response = app.get("/members", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["full_name"], "Grace Hopper");
    assert!(members.iter().all(|m| m.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_added_member_can_sign_in() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.post_form("/members", GRACE, Some(&token)).await;

    let response = app
        .post_form("/auth/login", "email=grace%40example.com&password=compiler1", None)
        .await;

    assert_redirect(&response, "/projects");
}

#[tokio::test]
async fn test_duplicate_member_email_is_refused() {
    let app = TestApp::new();
    let token = app.admin().await;
    app.post_form("/members", GRACE, Some(&token)).await;

    let response = app
        .post_form("/members", &GRACE.replace("grace%40", "GRACE%40"), Some(&token))
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(
        flash.message,
        "A member with email 'GRACE@example.com' already exists"
    );
}

#[tokio::test]
async fn test_short_password_is_refused() {
    let app = TestApp::new();
    let token = app.admin().await;

    let response = app
        .post_form(
            "/members",
            &GRACE.replace("password=compiler1", "password=short"),
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.message, "Password must be at least 8 characters");
}

#[tokio::test]
async fn test_update_member_keeps_password() {
    let app = TestApp::new();
    let token = app.admin().await;
    let (member, _) = app.signed_in(MemberRole::User).await;

    let response = app
        .post_form(
            &format!("/members/{}", member.id),
            &format!(
                "first_name=Renamed&last_name=Person&email={}&city=Oslo&role=admin",
                member.email.replace('@', "%40")
            ),
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.message, "Renamed Person was updated");

    let stored = app.repos.members.get_by_id(member.id).await.unwrap();
    assert_eq!(stored.first_name, "Renamed");
    assert_eq!(stored.city.as_deref(), Some("Oslo"));
    assert_eq!(stored.role, MemberRole::Admin);
    assert_eq!(stored.password_hash, member.password_hash);
}

#[tokio::test]
async fn test_last_admin_cannot_be_demoted() {
    let app = TestApp::new();
    let (admin, token) = app.signed_in(MemberRole::Admin).await;

    let response = app
        .post_form(
            &format!("/members/{}", admin.id),
            &format!(
                "first_name=Test&last_name=Admin&email={}&role=user",
                admin.email.replace('@', "%40")
            ),
            Some(&token),
        )
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "The last administrator cannot be demoted");
}

#[tokio::test]
async fn test_get_member_envelope() {
    let app = TestApp::new();
    let token = app.admin().await;
    let (member, _) = app.signed_in(MemberRole::User).await;

    let response = app.get(&format!("/members/{}", member.id), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["result"]["email"], member.email.as_str());
    assert_eq!(body["result"]["role"], "user");
    assert!(body["result"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_delete_member_drops_project_assignments() {
    let app = TestApp::new();
    let token = app.admin().await;
    let (member, _) = app.signed_in(MemberRole::User).await;
    let client = app.seed_client("Acme").await;
    let status = app.seed_status("Started", 0).await;
    let project = app.seed_project("Website", &client, &status).await;
    app.repos
        .projects
        .set_members(project.id, &[member.id])
        .await
        .unwrap();

    let response = app
        .post_form(&format!("/members/{}/delete", member.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.message, "Member was deleted");

    let page: Value = json_body(app.get(&format!("/projects/{}", project.id), Some(&token)).await).await;
    assert_eq!(page["result"]["members"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let app = TestApp::new();
    let (admin, token) = app.signed_in(MemberRole::Admin).await;

    let response = app
        .post_form(&format!("/members/{}/delete", admin.id), "", Some(&token))
        .await;

    let flash = assert_redirect(&response, "/members").unwrap();
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "You cannot delete your own account");
    assert!(app.repos.members.get_by_id(admin.id).await.is_ok());
}

#[tokio::test]
async fn test_regular_member_cannot_see_members() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(MemberRole::User).await;

    let response = app.get("/members", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = json_body(response).await;
    assert_eq!(body["message"], "Only administrators can manage this section");
}
