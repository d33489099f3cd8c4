//! PostgreSQL persistence adapters built on Diesel.

mod diesel_case_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_case_repository::DieselCaseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
