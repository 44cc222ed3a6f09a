use deadpool_postgres::Pool;
use nutri_core::models::user::UserInfo;

use crate::error::AppError;
use crate::password::{hash_password, verify_password};

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool,
}

impl UserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create an account. Returns `false` when the username is already taken.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<bool, AppError> {
        let hash = hash_password(password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let client = self.pool.get().await?;
        let inserted = client
            .execute(
                "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) \
                 ON CONFLICT (username) DO NOTHING",
                &[&username, &email, &hash],
            )
            .await?;
        Ok(inserted == 1)
    }

    /// Check a username/password pair. Unknown users and bad passwords are both `false`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT password FROM users WHERE username = $1", &[&username])
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };
        let hash: String = row.get(0);
        match verify_password(password, &hash) {
            Ok(ok) => Ok(ok),
            Err(e) => {
                tracing::warn!(username, error = %e, "Stored password hash is malformed");
                Ok(false)
            }
        }
    }

    /// Account details without the password hash
    pub async fn get_user_info(&self, username: &str) -> Result<Option<UserInfo>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, username, email, created_at FROM users WHERE username = $1",
                &[&username],
            )
            .await?;

        Ok(row.map(|row| UserInfo {
            id: row.get(0),
            username: row.get(1),
            email: row.get(2),
            created_at: row.get(3),
        }))
    }

    pub async fn update_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE users SET email = $1 WHERE username = $2",
                &[&email, &username],
            )
            .await?;
        Ok(updated == 1)
    }

    /// Remove the account row. Water logs and streaks are left in place.
    pub async fn delete(&self, username: &str) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM users WHERE username = $1", &[&username])
            .await?;
        Ok(deleted == 1)
    }
}
