//! MySQL implementation of the UserRepository trait.
//!
//! Users live in `user_details`; the public `appId` comes from the joined
//! `app_info` row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use um_core::domain::entities::user::{User, UserStatus};
use um_core::errors::DomainError;
use um_core::repositories::UserRepository;

use super::column_error;

const SELECT_USER: &str = r#"
    SELECT u.id, u.user_id, u.email, u.email_code, u.code_expires_at, u.status,
           u.app_info_id, a.app_id, u.created_at, u.updated_at, u.email_verified_at
    FROM user_details u
    INNER JOIN app_info a ON a.id = u.app_info_id
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let app_info_id: String = row
            .try_get("app_info_id")
            .map_err(|e| column_error("app_info_id", e))?;
        let status_code: i16 = row.try_get("status").map_err(|e| column_error("status", e))?;

        let status = UserStatus::from_code(status_code).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown user status: {}", status_code),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| column_error("user_id", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            email_code: row
                .try_get("email_code")
                .map_err(|e| column_error("email_code", e))?,
            code_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("code_expires_at")
                .map_err(|e| column_error("code_expires_at", e))?,
            status,
            app_info_id: Uuid::parse_str(&app_info_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid app_info UUID: {}", e),
            })?,
            app_id: row.try_get("app_id").map_err(|e| column_error("app_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| column_error("email_verified_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email_and_app_id(
        &self,
        email: &str,
        app_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE u.email = ? AND a.app_id = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(email)
            .bind(app_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE u.user_id = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn activate_pending(
        &self,
        pending: &User,
        activated_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let mut user = pending.clone();
        user.activate(activated_at);

        // Binary collation: codes compare case-sensitively
        let query = r#"
            UPDATE user_details
            SET status = ?, email_code = NULL, code_expires_at = NULL,
                email_verified_at = ?, updated_at = ?
            WHERE id = ? AND status = ? AND email_code = ? COLLATE utf8mb4_bin
        "#;

        let result = sqlx::query(query)
            .bind(UserStatus::Active.code())
            .bind(user.email_verified_at)
            .bind(user.updated_at)
            .bind(pending.id.to_string())
            .bind(UserStatus::PendingConfirmation.code())
            .bind(&pending.email_code)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to activate user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn revert_activation(&self, pending: &User) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE user_details
            SET status = ?, email_code = ?, code_expires_at = ?,
                email_verified_at = ?, updated_at = ?
            WHERE id = ? AND status = ? AND email_code IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(pending.status.code())
            .bind(&pending.email_code)
            .bind(pending.code_expires_at)
            .bind(pending.email_verified_at)
            .bind(pending.updated_at)
            .bind(pending.id.to_string())
            .bind(UserStatus::Active.code())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revert user activation: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
