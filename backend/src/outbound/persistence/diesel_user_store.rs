//! PostgreSQL-backed [`UserStore`] implementation using Diesel ORM.
//!
//! Creation inserts the user row and its companion member row inside a
//! single transaction so a partial write cannot occur. The profile update
//! is a conditional write guarded on the id and the previously-read
//! username; a guard miss is reported as a distinct error variant.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserId, UserProfile};

use super::models::{NewMemberRow, NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{members, users};

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port errors.
fn map_pool_error(error: PoolError) -> UserStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to port errors.
fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            // Conflicts are pre-checked; one slipping through here raced a
            // concurrent write and degrades to a query failure.
            UserStoreError::query("unique constraint violation")
        }
        _ => UserStoreError::query("database error"),
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn username_taken_by_other(
        &self,
        username: &str,
        exclude: UserId,
    ) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let hit: Option<i32> = users::table
            .filter(
                users::username
                    .eq(username)
                    .and(users::id.ne(exclude.get())),
            )
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(hit.is_some())
    }

    async fn email_taken_by_other(
        &self,
        email: &str,
        exclude: UserId,
    ) -> Result<bool, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let hit: Option<i32> = users::table
            .filter(users::email.eq(email).and(users::id.ne(exclude.get())))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(hit.is_some())
    }

    async fn create_with_member(
        &self,
        profile: &UserProfile,
        password: &str,
    ) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_user = NewUserRow {
            username: &profile.username,
            email: &profile.email,
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            password,
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    let user: UserRow = diesel::insert_into(users::table)
                        .values(&new_user)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(members::table)
                        .values(NewMemberRow { user_id: user.id })
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(user)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into_user())
    }

    async fn update_profile(
        &self,
        id: UserId,
        expected_username: &str,
        profile: &UserProfile,
    ) -> Result<User, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserProfileChangeset {
            username: &profile.username,
            email: &profile.email,
            first_name: &profile.first_name,
            last_name: &profile.last_name,
        };

        let updated: Option<UserRow> = diesel::update(
            users::table.filter(
                users::id
                    .eq(id.get())
                    .and(users::username.eq(expected_username)),
            ),
        )
        .set(&changeset)
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        updated
            .map(UserRow::into_user)
            .ok_or(UserStoreError::PreconditionFailed)
    }
}

#[cfg(test)]
mod tests {
    //! Error-mapping coverage; query behaviour is exercised against a live
    //! database in deployment environments.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserStoreError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, UserStoreError::Query { .. }));
    }
}
