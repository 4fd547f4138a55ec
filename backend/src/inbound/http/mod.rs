//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

pub mod error;
pub mod exercises;
pub mod health;
pub mod logs;
pub mod pages;
pub mod payload;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// The `/api` scope with every REST handler registered.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(users::create_user)
        .service(users::list_users)
        .service(exercises::add_exercise)
        .service(logs::get_exercise_log)
}
