// src/db/agendamento_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::agendamento::{Agendamento, CreateAgendamentoPayload, UpdateAgendamentoPayload},
};

#[async_trait]
pub trait AgendamentoStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Agendamento>, AppError>;
    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Agendamento>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agendamento>, AppError>;
    /// Agendamentos do cliente com `data_hora` no intervalo aberto `(after, before)`.
    async fn find_conflicting(
        &self,
        client_id: Uuid,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Agendamento>, AppError>;
    async fn create(&self, payload: &CreateAgendamentoPayload) -> Result<Agendamento, AppError>;
    async fn update(&self, id: Uuid, payload: &UpdateAgendamentoPayload) -> Result<Option<Agendamento>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const AGENDAMENTO_COLUMNS: &str =
    "id, client_id, titulo, descricao, data_hora, local, link, created_at, updated_at";

#[derive(Clone)]
pub struct AgendamentoRepository {
    pool: PgPool,
}

impl AgendamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgendamentoStore for AgendamentoRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Agendamento>, AppError> {
        let sql = format!(
            "SELECT {AGENDAMENTO_COLUMNS} FROM agendamentos ORDER BY data_hora ASC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Agendamento>, AppError> {
        let sql = format!(
            r#"
            SELECT {AGENDAMENTO_COLUMNS} FROM agendamentos
            WHERE client_id = $1
            ORDER BY data_hora ASC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(client_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agendamento>, AppError> {
        let sql = format!("SELECT {AGENDAMENTO_COLUMNS} FROM agendamentos WHERE id = $1");
        let row = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_conflicting(
        &self,
        client_id: Uuid,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Agendamento>, AppError> {
        // `$4 IS NULL` cobre a criação; na atualização o próprio registro fica de fora
        let sql = format!(
            r#"
            SELECT {AGENDAMENTO_COLUMNS} FROM agendamentos
            WHERE client_id = $1
              AND data_hora > $2
              AND data_hora < $3
              AND ($4::uuid IS NULL OR id <> $4)
            "#
        );
        let rows = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(client_id)
            .bind(after)
            .bind(before)
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, payload: &CreateAgendamentoPayload) -> Result<Agendamento, AppError> {
        let sql = format!(
            r#"
            INSERT INTO agendamentos (client_id, titulo, descricao, data_hora, local, link)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {AGENDAMENTO_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(payload.client_id)
            .bind(&payload.titulo)
            .bind(&payload.descricao)
            .bind(payload.data_hora)
            .bind(&payload.local)
            .bind(&payload.link)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, payload: &UpdateAgendamentoPayload) -> Result<Option<Agendamento>, AppError> {
        let sql = format!(
            r#"
            UPDATE agendamentos SET
                titulo = COALESCE($2, titulo),
                descricao = COALESCE($3, descricao),
                data_hora = COALESCE($4, data_hora),
                local = COALESCE($5, local),
                link = COALESCE($6, link),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {AGENDAMENTO_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(id)
            .bind(&payload.titulo)
            .bind(&payload.descricao)
            .bind(payload.data_hora)
            .bind(&payload.local)
            .bind(&payload.link)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM agendamentos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
