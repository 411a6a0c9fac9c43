use crate::{DbError, Result as DbErrorResult};

use tm_core::{Role, User};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tm_auth::{AuthError, UserStore};

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. New accounts start active and unverified.
    pub async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> DbErrorResult<User> {
        let registered_at = Utc::now();
        let registered_at_ts = registered_at.timestamp();
        let role_id = role.as_i64();

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    email, username, password_hash,
                    is_active, is_verified, role, registered_at
                ) VALUES (?, ?, ?, 1, 0, ?, ?)
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role_id)
        .bind(registered_at_ts)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_active: true,
            is_verified: false,
            role,
            registered_at,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, email, username, password_hash,
                    is_active, is_verified, role, registered_at
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, email, username, password_hash,
                    is_active, is_verified, role, registered_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    pub async fn find_all(&self, skip: i64, limit: i64) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
                SELECT id, email, username, password_hash,
                    is_active, is_verified, role, registered_at
                FROM users
                ORDER BY id
                LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user_row).collect()
    }

    pub async fn update_password_hash(&self, id: i64, password_hash: &str) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE users
                SET password_hash = ?
                WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn map_user_row(row: &SqliteRow) -> DbErrorResult<User> {
    let role_id: i64 = row.try_get("role")?;
    let registered_at: i64 = row.try_get("registered_at")?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        is_verified: row.try_get("is_verified")?,
        role: Role::from_i64(role_id).map_err(|e| DbError::Decode {
            message: format!("Invalid role in users.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        registered_at: DateTime::from_timestamp(registered_at, 0).ok_or_else(|| {
            DbError::Decode {
                message: "Invalid timestamp in users.registered_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}

#[track_caller]
fn store_error(e: DbError) -> AuthError {
    AuthError::Store {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        UserRepository::find_by_email(self, email)
            .await
            .map_err(store_error)
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<(), AuthError> {
        UserRepository::update_password_hash(self, user_id, password_hash)
            .await
            .map_err(store_error)
    }
}
