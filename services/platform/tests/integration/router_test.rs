use axum::http::{HeaderValue, Method, StatusCode, header};
use sea_orm::{DatabaseConnection, DbBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use uuid::Uuid;

use questline_platform_schema::users;
use questline_testing::auth::MockAuth;

use crate::helpers::{NOW_MILLIS, test_server, test_server_on};

fn member() -> MockAuth {
    MockAuth::member(Uuid::now_v7())
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_without_auth() {
    test_server().get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_ready_when_database_answers() {
    test_server().get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_when_database_unreachable() {
    test_server_on(DatabaseConnection::Disconnected, NOW_MILLIS)
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Pre-flight ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_acknowledge_options_on_every_route() {
    let server = test_server();
    for uri in [
        "/verify",
        "/users/@me",
        "/challenges",
        "/onboarding/progress",
        "/submissions",
    ] {
        let resp = server.method(Method::OPTIONS, uri).await;
        assert_eq!(resp.status_code(), StatusCode::OK, "uri: {uri}");
        assert!(resp.text().is_empty(), "uri: {uri}");
    }
}

#[tokio::test]
async fn should_answer_cors_preflight_with_allow_headers() {
    let resp = test_server()
        .method(Method::OPTIONS, "/verify")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://app.example.com"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("authorization,content-type"),
        )
        .await;

    resp.assert_status_ok();
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_bearer_token_on_crud_routes() {
    let server = test_server();
    for uri in [
        "/users/@me",
        "/challenges",
        "/onboarding/steps",
        "/onboarding/progress",
        "/submissions",
    ] {
        let resp = server.get(uri).await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(resp.json::<Value>()["kind"], "UNAUTHORIZED", "uri: {uri}");
    }
}

#[tokio::test]
async fn should_reject_non_bearer_scheme() {
    test_server()
        .get("/users/@me")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ── Validation before the database ───────────────────────────────────────────

#[tokio::test]
async fn should_reject_blank_display_name() {
    let resp = test_server()
        .post("/users")
        .authorization_bearer(member().token())
        .json(&json!({ "email": "ada@example.com", "display_name": "  " }))
        .await;

    resp.assert_status_bad_request();
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_DISPLAY_NAME");
}

#[tokio::test]
async fn should_forbid_challenge_creation_for_members() {
    let resp = test_server()
        .post("/challenges")
        .authorization_bearer(member().token())
        .json(&json!({ "title": "Quest", "description": "", "points": 10 }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_validate_admin_challenge_input() {
    let server = test_server();
    let token = MockAuth::admin(Uuid::now_v7()).token();

    let negative = server
        .post("/challenges")
        .authorization_bearer(&token)
        .json(&json!({ "title": "Quest", "points": -5 }))
        .await;
    negative.assert_status_bad_request();
    assert_eq!(negative.json::<Value>()["kind"], "INVALID_POINTS");

    let untitled = server
        .post("/challenges")
        .authorization_bearer(&token)
        .json(&json!({ "title": "", "points": 5 }))
        .await;
    untitled.assert_status_bad_request();
    assert_eq!(untitled.json::<Value>()["kind"], "INVALID_TITLE");
}

#[tokio::test]
async fn should_require_exactly_one_submission_target() {
    let server = test_server();
    let token = member().token();
    let both = json!({
        "challenge_id": Uuid::now_v7(),
        "step_id": Uuid::now_v7(),
        "content": "x",
    });
    for body in [json!({ "content": "x" }), both] {
        let resp = server
            .post("/submissions")
            .authorization_bearer(&token)
            .json(&body)
            .await;
        resp.assert_status_bad_request();
        assert_eq!(resp.json::<Value>()["kind"], "INVALID_TARGET");
    }
}

#[tokio::test]
async fn should_reject_unknown_status_literals() {
    let server = test_server();
    let token = member().token();

    let query = server
        .get("/submissions?status=finished")
        .authorization_bearer(&token)
        .await;
    query.assert_status_bad_request();
    assert_eq!(query.json::<Value>()["kind"], "BAD_REQUEST");

    let patch = server
        .patch(&format!("/submissions/{}", Uuid::now_v7()))
        .authorization_bearer(&token)
        .json(&json!({ "status": "Approved" }))
        .await;
    patch.assert_status_bad_request();
    assert_eq!(patch.json::<Value>()["kind"], "BAD_REQUEST");
}

#[tokio::test]
async fn should_reject_non_uuid_path_ids() {
    let server = test_server();
    let token = member().token();

    for uri in ["/challenges/abc", "/onboarding/steps/1"] {
        let resp = server.get(uri).authorization_bearer(&token).await;
        resp.assert_status_bad_request();
        assert_eq!(resp.json::<Value>()["kind"], "BAD_REQUEST", "uri: {uri}");
    }

    server
        .patch("/submissions/xyz")
        .authorization_bearer(&token)
        .json(&json!({ "status": "denied" }))
        .await
        .assert_status_bad_request();
}

// ── Database faults ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_when_submitting_without_profile() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let resp = test_server_on(db, NOW_MILLIS)
        .post("/submissions")
        .authorization_bearer(member().token())
        .json(&json!({ "step_id": Uuid::now_v7(), "content": "hello" }))
        .await;

    resp.assert_status_not_found();
    assert_eq!(resp.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_surface_database_failure_as_internal() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".into())])
        .into_connection();
    let resp = test_server_on(db, NOW_MILLIS)
        .get("/users/@me")
        .authorization_bearer(member().token())
        .await;

    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    resp.assert_json(&json!({ "kind": "INTERNAL", "message": "internal error" }));
}
