//! Exercise logging handler.
//!
//! ```text
//! POST /api/users/{user_id}/exercises {"description":"run","duration":30,"date":"2023-05-10"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::exercise_log_service::SAVE_EXERCISE_FAILED;
use crate::domain::ports::{AddExerciseRequest, LoggedExercise};
use crate::domain::{ExerciseDraft, format_log_date};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::{
    DurationField, DurationValue, JsonOrForm, RequestBody, lenient_text,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Exercise body for `POST /api/users/{user_id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddExerciseBody {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "run")]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 30)]
    pub duration: Option<DurationField>,
    /// Date of the exercise; today when omitted or blank.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "2023-05-10")]
    pub date: Option<String>,
}

impl From<AddExerciseBody> for ExerciseDraft {
    fn from(body: AddExerciseBody) -> Self {
        Self {
            description: body.description,
            duration: body.duration.map(Into::into),
            date: body.date,
        }
    }
}

impl RequestBody for AddExerciseBody {
    const REJECTED: &'static str = SAVE_EXERCISE_FAILED;
}

/// Stored exercise echoed back with its owner. `_id` is the user's id.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    #[schema(value_type = f64, example = 30)]
    pub duration: DurationValue,
    #[schema(example = "Wed May 10 2023")]
    pub date: String,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
}

impl From<LoggedExercise> for ExerciseResponse {
    fn from(value: LoggedExercise) -> Self {
        let LoggedExercise { user, exercise } = value;
        Self {
            username: user.username().to_string(),
            description: exercise.description().as_ref().to_owned(),
            duration: exercise.duration().into(),
            date: format_log_date(exercise.date()),
            id: user.id().to_string(),
        }
    }
}

/// Log an exercise against an existing user.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/exercises",
    params(("user_id" = String, Path, description = "Identifier of the owning user")),
    request_body(
        description = "Exercise as JSON or as a URL-encoded form",
        content(
            (AddExerciseBody = "application/json"),
            (AddExerciseBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Exercise stored", body = ExerciseResponse),
        (status = 400, description = "Body is malformed JSON"),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Exercise could not be saved", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/users/{user_id}/exercises")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: JsonOrForm<AddExerciseBody>,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let user_id = parse_user_id(path.as_str())?;
    let logged = state
        .exercises
        .add_exercise(AddExerciseRequest {
            user_id,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(ExerciseResponse::from(logged)))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
