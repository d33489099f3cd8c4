//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Legal cases table.
    ///
    /// `case_number` carries a unique index; it backs the duplicate check.
    legal_cases (id) {
        /// Primary key, store-assigned.
        id -> Int8,
        /// Unique business key.
        #[max_length = 20]
        case_number -> Varchar,
        #[max_length = 100]
        title -> Varchar,
        description -> Nullable<Text>,
        /// Workflow status stored by its wire name, e.g. `IN_PROGRESS`.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp, stamped once and never updated.
        created_date -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts table.
    ///
    /// `username` carries a unique index. Passwords are stored only as
    /// salted hashes.
    users (id) {
        id -> Int8,
        #[max_length = 50]
        username -> Varchar,
        password_hash -> Text,
        roles -> Array<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(legal_cases, users);
