//! Tests for server construction, routing and middleware wiring.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use super::*;
use actix_web::http::{StatusCode, header};
use actix_web::test;
use chrono::{DateTime, Local, TimeZone, Utc};
use exercise_tracker::domain::TRACE_ID_HEADER;
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 5, 10, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn assets_in(dir: &Path) -> StaticAssets {
    StaticAssets::new(dir.join("views"), dir.join("public"))
}

fn in_memory_deps(assets: StaticAssets) -> AppDependencies {
    let state = state_from_repositories(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryExerciseRepository::new()),
        Arc::new(FixtureClock),
    );
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(state),
        assets: web::Data::new(assets),
    }
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, bind_address: SocketAddr) {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(!health_state.is_ready(), "state should start unready");

    let config = ServerConfig::new(bind_address, assets_in(dir.path()));
    assert!(!config.has_db_pool());
    let _server = create_server(health_state.clone(), config).expect("server should bind");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_web::test]
async fn create_server_reports_bind_failures(health_state: web::Data<HealthState>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let taken = listener.local_addr().expect("local addr");

    let config = ServerConfig::new(taken, assets_in(dir.path()));
    assert_eq!(config.bind_addr, taken);
    let result = create_server(health_state.clone(), config);

    assert!(result.is_err(), "binding an occupied port should fail");
    assert!(!health_state.is_ready());
}

#[rstest]
#[actix_web::test]
async fn app_serves_the_api_under_the_api_prefix() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(build_app(in_memory_deps(assets_in(dir.path())))).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "alice" }))
            .to_request(),
    )
    .await;
    let user_id = created["_id"].as_str().expect("id").to_owned();

    let exercise: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/users/{user_id}/exercises"))
            .set_form([("description", "run"), ("duration", "30")])
            .to_request(),
    )
    .await;

    assert_eq!(exercise["username"], "alice");
    assert_eq!(exercise["duration"], 30);
    assert_eq!(exercise["date"], "Wed May 10 2023");
}

#[rstest]
#[actix_web::test]
async fn responses_carry_a_trace_id() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(build_app(in_memory_deps(assets_in(dir.path())))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn cross_origin_requests_are_allowed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(build_app(in_memory_deps(assets_in(dir.path())))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users")
            .insert_header((header::ORIGIN, "https://client.example"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[rstest]
#[actix_web::test]
async fn public_assets_are_served_from_the_root() {
    let dir = tempfile::tempdir().expect("temp dir");
    let public = dir.path().join("public");
    std::fs::create_dir_all(&public).expect("public dir");
    std::fs::write(public.join("style.css"), "body { margin: 0; }").expect("write css");
    let app = test::init_service(build_app(in_memory_deps(assets_in(dir.path())))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/style.css").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body.as_ref(), b"body { margin: 0; }");
}

#[rstest]
#[actix_web::test]
async fn unknown_paths_are_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app = test::init_service(build_app(in_memory_deps(assets_in(dir.path())))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/nowhere").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
