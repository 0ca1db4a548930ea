// src/db/documento_processo_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::documento_processo::{
        DocumentoProcesso, NewDocumentoProcesso, UpdateDocumentoProcessoPayload,
    },
};

#[async_trait]
pub trait DocumentoProcessoStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError>;
    async fn list_by_processo(&self, processo_id: Uuid, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DocumentoProcesso>, AppError>;
    async fn create(&self, new: NewDocumentoProcesso) -> Result<DocumentoProcesso, AppError>;
    async fn update(&self, id: Uuid, payload: &UpdateDocumentoProcessoPayload) -> Result<Option<DocumentoProcesso>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const DOCUMENTO_COLUMNS: &str = r#"
    id, processo_id, nome, descricao, tipo, file_url, file_key, file_size, mime_type,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct DocumentoProcessoRepository {
    pool: PgPool,
}

impl DocumentoProcessoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentoProcessoStore for DocumentoProcessoRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError> {
        let sql = format!(
            "SELECT {DOCUMENTO_COLUMNS} FROM documentos_processo ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let docs = sqlx::query_as::<_, DocumentoProcesso>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn list_by_processo(&self, processo_id: Uuid, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError> {
        let sql = format!(
            r#"
            SELECT {DOCUMENTO_COLUMNS} FROM documentos_processo
            WHERE processo_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let docs = sqlx::query_as::<_, DocumentoProcesso>(&sql)
            .bind(processo_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DocumentoProcesso>, AppError> {
        let sql = format!("SELECT {DOCUMENTO_COLUMNS} FROM documentos_processo WHERE id = $1");
        let doc = sqlx::query_as::<_, DocumentoProcesso>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn create(&self, new: NewDocumentoProcesso) -> Result<DocumentoProcesso, AppError> {
        let sql = format!(
            r#"
            INSERT INTO documentos_processo (
                processo_id, nome, descricao, tipo, file_url, file_key, file_size, mime_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DOCUMENTO_COLUMNS}
            "#
        );
        let doc = sqlx::query_as::<_, DocumentoProcesso>(&sql)
            .bind(new.processo_id)
            .bind(&new.nome)
            .bind(&new.descricao)
            .bind(&new.tipo)
            .bind(&new.file_url)
            .bind(&new.file_key)
            .bind(new.file_size)
            .bind(&new.mime_type)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn update(&self, id: Uuid, payload: &UpdateDocumentoProcessoPayload) -> Result<Option<DocumentoProcesso>, AppError> {
        let sql = format!(
            r#"
            UPDATE documentos_processo SET
                nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao),
                tipo = COALESCE($4, tipo),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {DOCUMENTO_COLUMNS}
            "#
        );
        let doc = sqlx::query_as::<_, DocumentoProcesso>(&sql)
            .bind(id)
            .bind(&payload.nome)
            .bind(&payload.descricao)
            .bind(&payload.tipo)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documentos_processo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
