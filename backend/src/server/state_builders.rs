//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use exercise_tracker::domain::ports::{ExerciseRepository, UserRepository};
use exercise_tracker::domain::{ExerciseLogService, UserRegistrationService};
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use exercise_tracker::outbound::persistence::{DieselExerciseRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the driving ports over a pair of repositories.
///
/// Both services share the user repository so exercises are always checked
/// against the users the registration service wrote.
pub(crate) fn state_from_repositories<U, E>(
    users: Arc<U>,
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    let registration = Arc::new(UserRegistrationService::new(Arc::clone(&users)));
    let exercise_log = Arc::new(ExerciseLogService::new(users, exercises, clock));
    HttpState::new(
        registration.clone(),
        registration,
        exercise_log.clone(),
        exercise_log,
    )
}

/// Build the HTTP state using Diesel adapters when a pool is configured and
/// in-memory adapters otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => state_from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselExerciseRepository::new(pool.clone())),
            clock,
        ),
        None => {
            warn!("no database pool configured; users and exercises are kept in memory");
            state_from_repositories(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryExerciseRepository::new()),
                clock,
            )
        }
    };
    web::Data::new(state)
}
