// src/db/password_reset_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{common::error::AppError, models::password_reset::PasswordResetToken};

#[async_trait]
pub trait PasswordResetStore: Send + Sync {
    async fn create(&self, email: &str, token: &str, expires_at: DateTime<Utc>) -> Result<PasswordResetToken, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError>;
    /// Marca o token como usado. `false` se outro pedido já o consumiu.
    async fn consume(&self, token: &str) -> Result<bool, AppError>;
}

const TOKEN_COLUMNS: &str = "id, email, token, expires_at, used, created_at";

#[derive(Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetStore for PasswordResetRepository {
    async fn create(&self, email: &str, token: &str, expires_at: DateTime<Utc>) -> Result<PasswordResetToken, AppError> {
        let sql = format!(
            r#"
            INSERT INTO password_reset_tokens (email, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {TOKEN_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PasswordResetToken>(&sql)
            .bind(email)
            .bind(token)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM password_reset_tokens WHERE token = $1");
        let row = sqlx::query_as::<_, PasswordResetToken>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn consume(&self, token: &str) -> Result<bool, AppError> {
        // UPDATE condicional: sob concorrência, só um pedido vê rows_affected = 1
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used = TRUE WHERE token = $1 AND used = FALSE",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
