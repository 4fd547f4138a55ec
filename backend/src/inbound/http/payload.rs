//! Request and response bodies shared by the API handlers.
//!
//! Write endpoints accept both JSON and URL-encoded form bodies, so every
//! field arrives either typed or as text. Conversion into domain drafts happens
//! here; validation stays in the domain services.

use actix_web::dev::Payload;
use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{FromRequest, HttpMessage, HttpRequest, mime, web};
use futures_util::future::{LocalBoxFuture, ready};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{DurationInput, Error, Exercise, ExerciseDuration, User, format_log_date};

/// Request bodies decoded by [`JsonOrForm`].
pub trait RequestBody: DeserializeOwned + Default + 'static {
    /// Message of the internal error returned when a well-formed body holds
    /// values of the wrong shape, such as an object where text belongs.
    const REJECTED: &'static str;
}

/// Body extractor accepting `application/json` or
/// `application/x-www-form-urlencoded`.
///
/// Requests carrying neither content type, or an empty JSON body, decode as
/// the default body so the domain services reject the missing fields. Only
/// syntactically malformed JSON fails extraction with `400 Bad Request`.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<T> JsonOrForm<T> {
    /// Unwrap the decoded body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Absent,
}

impl BodyKind {
    fn of(req: &HttpRequest) -> Self {
        match req.mime_type() {
            Ok(Some(mime))
                if mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON) =>
            {
                Self::Json
            }
            Ok(Some(mime))
                if mime.type_() == mime::APPLICATION
                    && mime.subtype() == mime::WWW_FORM_URLENCODED =>
            {
                Self::Form
            }
            _ => Self::Absent,
        }
    }
}

fn rejected<T: RequestBody>(detail: &dyn std::fmt::Display) -> actix_web::Error {
    warn!(error = %detail, "request body rejected");
    Error::internal(T::REJECTED).into()
}

fn decode_json<T: RequestBody>(bytes: &[u8]) -> Result<T, actix_web::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(JsonPayloadError::Deserialize)?;
    serde_json::from_value(value).map_err(|err| rejected::<T>(&err))
}

impl<T: RequestBody> FromRequest for JsonOrForm<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match BodyKind::of(req) {
            BodyKind::Json => {
                let bytes = web::Bytes::from_request(req, payload);
                Box::pin(async move { decode_json(&bytes.await?).map(Self) })
            }
            BodyKind::Form => {
                let form = web::Form::<T>::from_request(req, payload);
                Box::pin(async move {
                    match form.await {
                        Ok(form) => Ok(Self(form.into_inner())),
                        Err(err) => match err.as_error::<UrlencodedError>() {
                            Some(UrlencodedError::Parse(parse)) => Err(rejected::<T>(parse)),
                            _ => Err(err),
                        },
                    }
                })
            }
            BodyKind::Absent => Box::pin(ready(Ok(Self(T::default())))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Deserialize an optional text field, rendering JSON numbers and booleans
/// as their literal text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

/// Duration as sent by clients: a JSON number or text. Booleans are kept as
/// text and fail numeric validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationField {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl From<DurationField> for DurationInput {
    fn from(value: DurationField) -> Self {
        match value {
            DurationField::Number(number) => Self::Number(number),
            DurationField::Text(text) => Self::Text(text),
            DurationField::Flag(flag) => Self::Text(flag.to_string()),
        }
    }
}

/// Duration as returned to clients: whole values render without a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DurationValue {
    Whole(i64),
    Fractional(f64),
}

impl From<ExerciseDuration> for DurationValue {
    fn from(value: ExerciseDuration) -> Self {
        value
            .as_whole()
            .map_or(Self::Fractional(value.value()), Self::Whole)
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "alice")]
    pub username: String,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// One entry of an exercise log.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LogEntryResponse {
    pub description: String,
    #[schema(value_type = f64, example = 30)]
    pub duration: DurationValue,
    #[schema(example = "Wed May 10 2023")]
    pub date: String,
}

impl From<&Exercise> for LogEntryResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description().as_ref().to_owned(),
            duration: exercise.duration().into(),
            date: format_log_date(exercise.date()),
        }
    }
}
