use sqlx::Result;

use super::PostgreDatabase;
use crate::models::{NewUser, User};

impl PostgreDatabase {
    /// Create a new user, returning the stored row
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, username, email, password_hash, role, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.sqlx_db)
        .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.sqlx_db)
                .await?;
        Ok(exists)
    }
}
