//! PostgreSQL-backed user store adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, Username};

use super::diesel_error_mapping::{diesel_error_message, is_unique_violation, pool_error_message};
use super::models::{row_to_user, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user store port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                UserPersistenceError::query(diesel_error_message(&error, "user read"))
            })?;
        row.map(|row| row_to_user(row).map_err(UserPersistenceError::query))
            .transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow {
                username: user.username.as_str(),
                password_hash: &user.password_hash,
                roles: user.roles.to_vec(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                // Unique index on username backstops concurrent signups.
                if is_unique_violation(&error) {
                    UserPersistenceError::duplicate(user.username.as_str())
                } else {
                    UserPersistenceError::query(diesel_error_message(&error, "user insert"))
                }
            })?;
        row_to_user(row).map_err(UserPersistenceError::query)
    }
}
