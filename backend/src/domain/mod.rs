//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services implementing the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User, Exercise: validated aggregates.
//! - ExerciseLogFilter: date window and limit applied to log reads.
//! - UserRegistrationService, ExerciseLogService: driving port
//!   implementations.

pub mod error;
pub mod exercise;
pub mod exercise_date;
pub mod exercise_log_service;
pub mod log_query;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_registration_service;

pub use self::error::{Error, ErrorCode};
pub use self::exercise::{
    Description, DurationInput, Exercise, ExerciseDraft, ExerciseDuration, ExerciseId,
    ExerciseValidationError,
};
pub use self::exercise_date::{DateInput, DateParseError, LOG_DATE_FORMAT, format_log_date};
pub use self::exercise_log_service::ExerciseLogService;
pub use self::log_query::{ExerciseLogFilter, parse_limit};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::user_registration_service::UserRegistrationService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use exercise_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
