//! Exercise data model and validation of submitted exercise drafts.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::{DateInput, DateParseError, UserId};

/// Validation failures for submitted exercises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseValidationError {
    /// Description was missing or blank.
    #[error("description is required")]
    MissingDescription,
    /// Duration was missing or blank.
    #[error("duration is required")]
    MissingDuration,
    /// Duration could not be read as a finite number.
    #[error("duration must be a number, got {value}")]
    InvalidDuration {
        /// The rejected input.
        value: String,
    },
    /// Date text was not recognised.
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
}

/// Identifier of a stored exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`]; blank input is rejected.
    pub fn new(description: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ExerciseValidationError::MissingDescription);
        }
        Ok(Self(description))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Exercise duration, in minutes by convention.
///
/// ## Invariants
/// - The value is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseDuration(f64);

/// Largest magnitude below which every whole `f64` is exactly representable
/// as an `i64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

impl ExerciseDuration {
    /// Construct a duration from a number.
    pub fn new(value: f64) -> Result<Self, ExerciseValidationError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(ExerciseValidationError::InvalidDuration {
                value: value.to_string(),
            })
        }
    }

    /// Parse a duration submitted as text, e.g. from a form body.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDuration;
    ///
    /// let duration = ExerciseDuration::parse(" 30 ").expect("numeric text");
    /// assert_eq!(duration.value(), 30.0);
    /// assert!(ExerciseDuration::parse("half an hour").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ExerciseValidationError::MissingDuration);
        }
        let value = text
            .parse::<f64>()
            .map_err(|_| ExerciseValidationError::InvalidDuration {
                value: raw.to_owned(),
            })?;
        Self::new(value).map_err(|_| ExerciseValidationError::InvalidDuration {
            value: raw.to_owned(),
        })
    }

    /// The raw numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value as an integer when it has no fractional part.
    pub fn as_whole(&self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() < EXACT_INTEGER_LIMIT {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "value is whole and within the exactly representable range"
            )]
            let whole = self.0 as i64;
            Some(whole)
        } else {
            None
        }
    }
}

/// Logged exercise owned by a user.
///
/// ## Invariants
/// - `user_id` referenced an existing user when the exercise was logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: ExerciseDuration,
    date: DateTime<Utc>,
}

impl Exercise {
    /// Build an exercise from validated components.
    pub fn new(
        id: ExerciseId,
        user_id: UserId,
        description: Description,
        duration: ExerciseDuration,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            description,
            duration,
            date,
        }
    }

    /// Stored identifier.
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Free-text description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Duration in minutes.
    pub fn duration(&self) -> ExerciseDuration {
        self.duration
    }

    /// When the exercise took place.
    pub fn date(&self) -> &DateTime<Utc> {
        &self.date
    }
}

/// Duration as submitted: JSON numbers arrive as numbers, form fields as text.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationInput {
    /// Numeric value.
    Number(f64),
    /// Text to be parsed as a number.
    Text(String),
}

/// Unvalidated exercise fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseDraft {
    /// Free-text description.
    pub description: Option<String>,
    /// Duration in minutes.
    pub duration: Option<DurationInput>,
    /// Optional date text; blank means "now".
    pub date: Option<String>,
}

impl ExerciseDraft {
    /// Validate the draft into an exercise owned by `user_id`.
    ///
    /// A missing or blank date falls back to `now`.
    pub fn validate(
        self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Exercise, ExerciseValidationError> {
        let description = Description::new(
            self.description
                .ok_or(ExerciseValidationError::MissingDescription)?,
        )?;
        let duration = match self.duration {
            Some(DurationInput::Number(value)) => ExerciseDuration::new(value)?,
            Some(DurationInput::Text(text)) => ExerciseDuration::parse(&text)?,
            None => return Err(ExerciseValidationError::MissingDuration),
        };
        let date = match self.date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => DateInput::parse(text)?.start(),
            _ => now,
        };

        Ok(Exercise::new(
            ExerciseId::random(),
            user_id,
            description,
            duration,
            date,
        ))
    }
}
