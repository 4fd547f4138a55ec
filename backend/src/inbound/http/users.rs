//! User registration and listing handlers.
//!
//! ```text
//! POST /api/users {"username":"alice"}
//! GET /api/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateUserRequest;
use crate::domain::user_registration_service::SAVE_USER_FAILED;
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::{JsonOrForm, RequestBody, UserResponse, lenient_text};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserBody {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "alice")]
    pub username: Option<String>,
}

impl RequestBody for CreateUserBody {
    const REJECTED: &'static str = SAVE_USER_FAILED;
}

/// Register a user under a generated identifier.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        description = "Username as JSON or as a URL-encoded form",
        content(
            (CreateUserBody = "application/json"),
            (CreateUserBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Body is malformed JSON"),
        (status = 500, description = "User could not be saved", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: JsonOrForm<CreateUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let body = payload.into_inner();
    let user = state
        .users
        .create_user(CreateUserRequest {
            username: body.username,
        })
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// List every registered user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Users could not be read", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
