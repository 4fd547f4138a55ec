//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the files under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Name supplied at registration; not unique.
        username -> Varchar,
        /// Insertion sequence, used for storage ordering.
        seq -> Int8,
    }
}

diesel::table! {
    /// Exercises logged against users.
    exercises (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        description -> Text,
        /// Duration in minutes; may be fractional.
        duration -> Float8,
        /// When the exercise took place.
        date -> Timestamptz,
        /// Insertion sequence, used for storage ordering.
        seq -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, exercises);
