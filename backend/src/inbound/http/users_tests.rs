//! Tests for user HTTP handlers.

use crate::domain::{Error, User, Username};
use crate::inbound::http::test_utils::{MockPorts, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn alice() -> User {
    User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "alice").expect("valid user")
}

#[rstest]
#[actix_web::test]
async fn create_user_accepts_json_bodies() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|request| request.username.as_deref() == Some("alice"))
        .times(1)
        .return_once(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({"username": "alice"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"username": "alice", "_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"})
    );
}

#[rstest]
#[actix_web::test]
async fn create_user_accepts_form_bodies() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|request| request.username.as_deref() == Some("alice"))
        .times(1)
        .return_once(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_form([("username", "alice")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn create_user_passes_missing_username_to_the_domain() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|request| request.username.is_none())
        .times(1)
        .return_once(|_| Err(Error::internal("Failed to save user")));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Failed to save user")
    );
}

#[rstest]
#[actix_web::test]
async fn create_user_without_a_body_reaches_the_domain() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|request| request.username.is_none())
        .times(1)
        .return_once(|_| Err(Error::internal("Failed to save user")));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post().uri("/api/users").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("error").and_then(Value::as_str), Some("Failed to save user"));
}

#[rstest]
#[case(json!({"username": 42}), "42")]
#[case(json!({"username": 4.5}), "4.5")]
#[case(json!({"username": true}), "true")]
#[actix_web::test]
async fn create_user_renders_scalar_usernames_as_text(
    #[case] payload: Value,
    #[case] expected: &'static str,
) {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(move |request| request.username.as_deref() == Some(expected))
        .times(1)
        .return_once(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case(json!({"username": {"first": "ada"}}))]
#[case(json!({"username": ["ada"]}))]
#[case(json!("ada"))]
#[actix_web::test]
async fn create_user_rejects_structured_bodies_as_save_failures(#[case] payload: Value) {
    let mut ports = MockPorts::default();
    ports.users.expect_create_user().times(0);
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("error").and_then(Value::as_str), Some("Failed to save user"));
    assert_eq!(body.get("code").and_then(Value::as_str), Some("internal_error"));
}

#[rstest]
#[actix_web::test]
async fn create_user_keeps_bad_request_for_malformed_json() {
    let mut ports = MockPorts::default();
    ports.users.expect_create_user().times(0);
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn list_users_returns_every_user() {
    let mut ports = MockPorts::default();
    let grace = User::register(Username::new("grace").expect("username"));
    let grace_id = grace.id().to_string();
    ports
        .users_query
        .expect_list_users()
        .times(1)
        .return_once(move || Ok(vec![alice(), grace]));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::get().uri("/api/users").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!([
            {"username": "alice", "_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"},
            {"username": "grace", "_id": grace_id},
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn list_users_reports_failures() {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_list_users()
        .times(1)
        .return_once(|| Err(Error::internal("Failed to retrieve users")));
    let app = actix_test::init_service(test_app(ports)).await;

    let req = actix_test::TestRequest::get().uri("/api/users").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
