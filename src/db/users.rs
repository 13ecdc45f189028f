use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// Credential store
///
/// The auth flow uses exactly two query shapes: a point lookup by username
/// and an insert that hands back the assigned id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new user and return the stored row.
    ///
    /// Fails with `AppError::UserAlreadyExists` when the username is taken.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> Result<()>;
}

/// `UserStore` backed by the Postgres `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::info!("Signup rejected, username already exists: {}", user.username);
                Err(AppError::UserAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
