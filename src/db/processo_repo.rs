// src/db/processo_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::{map_unique_violation, AppError},
        messages,
        pagination::Pagination,
    },
    models::processo::{CreateProcessoPayload, Processo, UpdateProcessoPayload},
};

#[async_trait]
pub trait ProcessoStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Processo>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Processo>, AppError>;
    async fn find_by_numero(&self, numero_processo: i64) -> Result<Option<Processo>, AppError>;
    async fn create(&self, payload: &CreateProcessoPayload) -> Result<Processo, AppError>;
    async fn update(&self, id: Uuid, payload: &UpdateProcessoPayload) -> Result<Option<Processo>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const PROCESSO_COLUMNS: &str = r#"
    id, numero_processo, tipo, status, tribunal, data_abertura, data_encerramento,
    client_id, responsavel_id, parte_contraria, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ProcessoRepository {
    pool: PgPool,
}

impl ProcessoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessoStore for ProcessoRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Processo>, AppError> {
        let sql = format!(
            "SELECT {PROCESSO_COLUMNS} FROM processos ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let processos = sqlx::query_as::<_, Processo>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(processos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Processo>, AppError> {
        let sql = format!("SELECT {PROCESSO_COLUMNS} FROM processos WHERE id = $1");
        let processo = sqlx::query_as::<_, Processo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(processo)
    }

    async fn find_by_numero(&self, numero_processo: i64) -> Result<Option<Processo>, AppError> {
        let sql = format!("SELECT {PROCESSO_COLUMNS} FROM processos WHERE numero_processo = $1");
        let processo = sqlx::query_as::<_, Processo>(&sql)
            .bind(numero_processo)
            .fetch_optional(&self.pool)
            .await?;
        Ok(processo)
    }

    async fn create(&self, payload: &CreateProcessoPayload) -> Result<Processo, AppError> {
        let sql = format!(
            r#"
            INSERT INTO processos (
                numero_processo, tipo, status, tribunal, data_abertura, data_encerramento,
                client_id, responsavel_id, parte_contraria
            )
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6, $7, $8, $9)
            RETURNING {PROCESSO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Processo>(&sql)
            .bind(payload.numero_processo)
            .bind(payload.tipo)
            .bind(payload.status.unwrap_or_default())
            .bind(&payload.tribunal)
            .bind(payload.data_abertura)
            .bind(payload.data_encerramento)
            .bind(payload.client_id)
            .bind(payload.responsavel_id)
            .bind(&payload.parte_contraria)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, messages::PROCESSO_NUMBER_EXISTS))
    }

    async fn update(&self, id: Uuid, payload: &UpdateProcessoPayload) -> Result<Option<Processo>, AppError> {
        let sql = format!(
            r#"
            UPDATE processos SET
                numero_processo = COALESCE($2, numero_processo),
                tipo = COALESCE($3, tipo),
                status = COALESCE($4, status),
                tribunal = COALESCE($5, tribunal),
                data_abertura = COALESCE($6, data_abertura),
                data_encerramento = COALESCE($7, data_encerramento),
                client_id = COALESCE($8, client_id),
                responsavel_id = COALESCE($9, responsavel_id),
                parte_contraria = COALESCE($10, parte_contraria),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROCESSO_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Processo>(&sql)
            .bind(id)
            .bind(payload.numero_processo)
            .bind(payload.tipo)
            .bind(payload.status)
            .bind(&payload.tribunal)
            .bind(payload.data_abertura)
            .bind(payload.data_encerramento)
            .bind(payload.client_id)
            .bind(payload.responsavel_id)
            .bind(&payload.parte_contraria)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, messages::PROCESSO_NUMBER_EXISTS))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM processos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
