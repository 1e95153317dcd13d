//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel
//! uses them for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` when migrations
//! change.

diesel::table! {
    /// User accounts. `username` and `email` carry unique constraints.
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// System-generated at creation; never returned to clients.
        password -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-to-one companion record created atomically with its user.
    members (id) {
        id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Posts authored by members; read-only for this service.
    posts (id) {
        id -> Int4,
        member_id -> Int4,
        title -> Varchar,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Votes cast on posts.
    votes (id) {
        id -> Int4,
        post_id -> Int4,
        member_id -> Int4,
    }
}

diesel::table! {
    /// Comments left on posts.
    comments (id) {
        id -> Int4,
        post_id -> Int4,
        member_id -> Int4,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(members -> users (user_id));
diesel::joinable!(posts -> members (member_id));
diesel::joinable!(votes -> posts (post_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(users, members, posts, votes, comments);
