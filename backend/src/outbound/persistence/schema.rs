//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Questions asked by users.
    questions (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Question text (3 to 500 characters).
        text -> Varchar,
        /// Server-assigned creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers attached to a question.
    answers (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Parent question; `ON DELETE CASCADE`.
        question_id -> Int8,
        /// Author of the answer.
        user_id -> Int8,
        /// Answer text (1 to 1000 characters).
        text -> Varchar,
        /// Server-assigned creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Int8,
        /// Unique login name (3 to 32 alphanumeric characters).
        username -> Varchar,
        password_hash -> Varchar,
    }
}

diesel::joinable!(answers -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(answers, questions, users);
