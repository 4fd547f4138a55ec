//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: user registration and listing, exercise logging, exercise
//!   log reads and the health probes
//! - **Schemas**: request and response bodies plus the error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep domain types free of
//!   utoipa derives
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::exercises::{AddExerciseBody, ExerciseResponse};
use crate::inbound::http::logs::LogResponse;
use crate::inbound::http::payload::{LogEntryResponse, UserResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::CreateUserBody;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, log exercises and read filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::logs::get_exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserBody,
        UserResponse,
        AddExerciseBody,
        ExerciseResponse,
        LogResponse,
        LogEntryResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Registering and listing users"),
        (name = "exercises", description = "Logging exercises and reading exercise logs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
