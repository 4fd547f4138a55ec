//! In-memory application harness shared by the HTTP integration suites.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use exercise_tracker::Trace;
use exercise_tracker::domain::{ExerciseLogService, UserRegistrationService};
use exercise_tracker::inbound::http::api_scope;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use mockable::Clock;
use serde_json::{Value, json};

/// Clock pinned to a single instant.
pub(crate) struct FixtureClock(pub(crate) DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant reported as "now" by [`tracker_app`].
pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 5, 10, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// API application over in-memory repositories and a pinned clock.
pub(crate) fn tracker_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let users = Arc::new(InMemoryUserRepository::new());
    let registration = Arc::new(UserRegistrationService::new(Arc::clone(&users)));
    let exercise_log = Arc::new(ExerciseLogService::new(
        users,
        Arc::new(InMemoryExerciseRepository::new()),
        Arc::new(FixtureClock(fixture_now())),
    ));
    let state = HttpState::new(
        registration.clone(),
        registration,
        exercise_log.clone(),
        exercise_log,
    );

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}

/// Register `username` and return the generated identifier.
pub(crate) async fn register<S, B>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body: Value = test::call_and_read_body_json(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": username }))
            .to_request(),
    )
    .await;
    body["_id"].as_str().expect("user id").to_owned()
}

/// Log an exercise through the JSON body and return the response body.
pub(crate) async fn log_exercise<S, B>(app: &S, user_id: &str, exercise: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    test::call_and_read_body_json(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/users/{user_id}/exercises"))
            .set_json(exercise)
            .to_request(),
    )
    .await
}
