//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockExerciseCommand, MockExerciseLogQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; unset expectations fail the test when called.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub exercises: MockExerciseCommand,
    pub exercise_log: MockExerciseLogQuery,
}

impl From<MockPorts> for HttpState {
    fn from(ports: MockPorts) -> Self {
        HttpState::new(
            Arc::new(ports.users),
            Arc::new(ports.users_query),
            Arc::new(ports.exercises),
            Arc::new(ports.exercise_log),
        )
    }
}

/// App exposing the `/api` scope over the supplied mocks.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::from(ports)))
        .service(api_scope())
}
