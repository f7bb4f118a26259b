//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/`. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// Course records.
    courses (id) {
        /// Primary key assigned by `gen_random_uuid()`.
        id -> Uuid,
        /// Course name (max 256 characters).
        name -> Varchar,
        /// Insertion timestamp from `clock_timestamp()`; drives list order.
        created_at -> Timestamptz,
    }
}
