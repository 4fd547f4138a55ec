//! In-process repositories used when no database is configured.
//!
//! Records live for the lifetime of the process and are kept in insertion
//! order, matching the ordering the Diesel adapters read back.

mod exercise_repository;
mod user_repository;

pub use exercise_repository::InMemoryExerciseRepository;
pub use user_repository::InMemoryUserRepository;
