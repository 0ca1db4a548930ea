// src/db/boleto_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::boleto::{Boleto, NewBoleto, UpdateBoletoPayload},
};

#[async_trait]
pub trait BoletoStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Boleto>, AppError>;
    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Boleto>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Boleto>, AppError>;
    async fn create(&self, new: NewBoleto) -> Result<Boleto, AppError>;
    async fn update(&self, id: Uuid, payload: &UpdateBoletoPayload) -> Result<Option<Boleto>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const BOLETO_COLUMNS: &str = r#"
    id, client_id, titulo, observacao, status, data_vencimento, file_url, file_key,
    file_size, mime_type, created_at, updated_at
"#;

#[derive(Clone)]
pub struct BoletoRepository {
    pool: PgPool,
}

impl BoletoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoletoStore for BoletoRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Boleto>, AppError> {
        let sql = format!(
            "SELECT {BOLETO_COLUMNS} FROM boletos ORDER BY data_vencimento ASC LIMIT $1 OFFSET $2"
        );
        let boletos = sqlx::query_as::<_, Boleto>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(boletos)
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Boleto>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOLETO_COLUMNS} FROM boletos
            WHERE client_id = $1
            ORDER BY data_vencimento ASC
            LIMIT $2 OFFSET $3
            "#
        );
        let boletos = sqlx::query_as::<_, Boleto>(&sql)
            .bind(client_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(boletos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Boleto>, AppError> {
        let sql = format!("SELECT {BOLETO_COLUMNS} FROM boletos WHERE id = $1");
        let boleto = sqlx::query_as::<_, Boleto>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(boleto)
    }

    async fn create(&self, new: NewBoleto) -> Result<Boleto, AppError> {
        let sql = format!(
            r#"
            INSERT INTO boletos (
                client_id, titulo, observacao, data_vencimento, file_url, file_key, file_size, mime_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOLETO_COLUMNS}
            "#
        );
        let boleto = sqlx::query_as::<_, Boleto>(&sql)
            .bind(new.client_id)
            .bind(&new.titulo)
            .bind(&new.observacao)
            .bind(new.data_vencimento)
            .bind(&new.file_url)
            .bind(&new.file_key)
            .bind(new.file_size)
            .bind(&new.mime_type)
            .fetch_one(&self.pool)
            .await?;
        Ok(boleto)
    }

    async fn update(&self, id: Uuid, payload: &UpdateBoletoPayload) -> Result<Option<Boleto>, AppError> {
        let sql = format!(
            r#"
            UPDATE boletos SET
                titulo = COALESCE($2, titulo),
                observacao = COALESCE($3, observacao),
                data_vencimento = COALESCE($4, data_vencimento),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOLETO_COLUMNS}
            "#
        );
        let boleto = sqlx::query_as::<_, Boleto>(&sql)
            .bind(id)
            .bind(&payload.titulo)
            .bind(&payload.observacao)
            .bind(payload.data_vencimento)
            .bind(payload.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(boleto)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM boletos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
