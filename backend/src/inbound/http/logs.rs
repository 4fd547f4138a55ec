//! Exercise log handler.
//!
//! ```text
//! GET /api/users/{user_id}/logs?from=2023-01-01&to=2023-12-31&limit=5
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ExerciseLog, ExerciseLogRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::LogEntryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Optional log filters. Values are kept as text so lenient parsing happens
/// in the domain.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Earliest date to include, e.g. `2023-01-01`.
    pub from: Option<String>,
    /// Latest date to include; a bare date covers the whole day.
    pub to: Option<String>,
    /// Maximum number of entries; non-positive or non-numeric means no limit.
    pub limit: Option<String>,
}

/// A user's filtered exercise log.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LogResponse {
    pub username: String,
    /// Number of entries in `log`.
    pub count: usize,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
    pub log: Vec<LogEntryResponse>,
}

impl From<ExerciseLog> for LogResponse {
    fn from(value: ExerciseLog) -> Self {
        Self {
            username: value.user.username().to_string(),
            count: value.count(),
            id: value.user.id().to_string(),
            log: value.entries.iter().map(LogEntryResponse::from).collect(),
        }
    }
}

/// Read a user's exercise log with optional date range and limit.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/logs",
    params(
        ("user_id" = String, Path, description = "Identifier of the owning user"),
        LogQueryParams
    ),
    responses(
        (status = 200, description = "Exercise log", body = LogResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Exercises could not be read", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExerciseLog"
)]
#[get("/users/{user_id}/logs")]
pub async fn get_exercise_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQueryParams>,
) -> ApiResult<web::Json<LogResponse>> {
    let user_id = parse_user_id(path.as_str())?;
    let LogQueryParams { from, to, limit } = query.into_inner();
    let log = state
        .exercise_log
        .fetch_log(ExerciseLogRequest {
            user_id,
            from,
            to,
            limit,
        })
        .await?;
    Ok(web::Json(LogResponse::from(log)))
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
