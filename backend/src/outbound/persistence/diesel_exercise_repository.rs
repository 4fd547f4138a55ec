//! PostgreSQL-backed `ExerciseRepository` implementation using Diesel ORM.
//!
//! Log reads push the date window and limit into SQL. Rows come back in
//! insertion order, following the `seq` column.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{
    Description, Exercise, ExerciseDuration, ExerciseId, ExerciseLogFilter, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::DbPool;
use super::schema::exercises;

/// Diesel-backed implementation of the `ExerciseRepository` port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExercisePersistenceError> {
    let invalid = |err: &dyn std::fmt::Display| {
        warn!(exercise_id = %row.id, error = %err, "stored exercise failed validation");
        ExercisePersistenceError::query(format!("invalid stored exercise {}", row.id))
    };
    let description = Description::new(row.description.clone()).map_err(|err| invalid(&err))?;
    let duration = ExerciseDuration::new(row.duration).map_err(|err| invalid(&err))?;

    Ok(Exercise::new(
        ExerciseId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        description,
        duration,
        row.date,
    ))
}

/// One user's exercises in storage order, narrowed by the filter.
fn log_rows(user_id: &UserId, filter: &ExerciseLogFilter) -> exercises::BoxedQuery<'static, Pg> {
    let mut query = exercises::table
        .filter(exercises::user_id.eq(*user_id.as_uuid()))
        .order(exercises::seq.asc())
        .into_boxed();
    if let Some(from) = filter.from() {
        query = query.filter(exercises::date.ge(from));
    }
    if let Some(to) = filter.to() {
        query = query.filter(exercises::date.le(to));
    }
    if let Some(limit) = filter.limit() {
        query = query.limit(i64::from(limit.get()));
    }
    query
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewExerciseRow {
            id: *exercise.id().as_uuid(),
            user_id: *exercise.user_id().as_uuid(),
            description: exercise.description().as_ref(),
            duration: exercise.duration().value(),
            date: *exercise.date(),
        };

        diesel::insert_into(exercises::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ExerciseRow> = log_rows(user_id, filter)
            .select(ExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_exercise).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    use chrono::{TimeZone, Utc};
    use diesel::debug_query;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(description: &str, duration: f64) -> ExerciseRow {
        ExerciseRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: description.to_owned(),
            duration,
            date: Utc
                .with_ymd_and_hms(2023, 5, 10, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn row_to_exercise_maps_all_columns() {
        let source = row("cycling", 42.5);
        let exercise = row_to_exercise(source.clone()).expect("valid row");

        assert_eq!(exercise.id().as_uuid(), &source.id);
        assert_eq!(exercise.user_id().as_uuid(), &source.user_id);
        assert_eq!(exercise.description().as_ref(), "cycling");
        assert_eq!(exercise.duration().value(), 42.5);
        assert_eq!(exercise.date(), &source.date);
    }

    #[rstest]
    #[case(row("", 10.0))]
    #[case(row("swim", f64::NAN))]
    fn row_to_exercise_rejects_invalid_rows(#[case] input: ExerciseRow) {
        let err = row_to_exercise(input).expect_err("invalid row");
        assert!(matches!(err, ExercisePersistenceError::Query { .. }));
    }

    #[rstest]
    fn log_rows_follow_the_insertion_sequence() {
        let user_id = UserId::from_uuid(Uuid::new_v4());
        let query = log_rows(&user_id, &ExerciseLogFilter::default());
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#"ORDER BY "exercises"."seq" ASC"#), "{sql}");
        assert!(!sql.contains("LIMIT"), "{sql}");
    }

    #[rstest]
    fn log_rows_push_the_window_and_limit_into_sql() {
        let user_id = UserId::from_uuid(Uuid::new_v4());
        let from = Utc
            .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let filter = ExerciseLogFilter::new(Some(from), None, NonZeroU32::new(2));
        let query = log_rows(&user_id, &filter);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#""exercises"."date" >= "#), "{sql}");
        assert!(!sql.contains(r#""exercises"."date" <= "#), "{sql}");
        assert!(sql.contains("LIMIT"), "{sql}");
    }
}
