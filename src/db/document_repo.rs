// src/db/document_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Pagination},
    models::document::{Document, NewDocument, UpdateDocumentPayload},
};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Document>, AppError>;
    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Document>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError>;
    async fn create(&self, new: NewDocument) -> Result<Document, AppError>;
    async fn update(&self, id: Uuid, payload: &UpdateDocumentPayload) -> Result<Option<Document>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const DOCUMENT_COLUMNS: &str =
    "id, client_id, name, file_url, file_key, file_size, mime_type, created_at, updated_at";

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Document>, AppError> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let docs = sqlx::query_as::<_, Document>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Document>, AppError> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE client_id = $1 ORDER BY created_at DESC"
        );
        let docs = sqlx::query_as::<_, Document>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1");
        let doc = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn create(&self, new: NewDocument) -> Result<Document, AppError> {
        let sql = format!(
            r#"
            INSERT INTO documents (client_id, name, file_url, file_key, file_size, mime_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let doc = sqlx::query_as::<_, Document>(&sql)
            .bind(new.client_id)
            .bind(&new.name)
            .bind(&new.file_url)
            .bind(&new.file_key)
            .bind(new.file_size)
            .bind(&new.mime_type)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn update(&self, id: Uuid, payload: &UpdateDocumentPayload) -> Result<Option<Document>, AppError> {
        let sql = format!(
            r#"
            UPDATE documents SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let doc = sqlx::query_as::<_, Document>(&sql)
            .bind(id)
            .bind(&payload.name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
