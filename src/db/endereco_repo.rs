// src/db/endereco_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::{map_unique_violation, AppError},
        messages,
    },
    models::endereco::{Endereco, EnderecoChanges, NewEndereco},
};

#[async_trait]
pub trait EnderecoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Endereco>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Endereco>, AppError>;
    async fn find_by_client(&self, client_id: Uuid) -> Result<Option<Endereco>, AppError>;
    async fn create(&self, new: NewEndereco) -> Result<Endereco, AppError>;
    async fn update(&self, id: Uuid, changes: EnderecoChanges) -> Result<Option<Endereco>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const ENDERECO_COLUMNS: &str = r#"
    id, client_id, cep, endereco, numero, complemento, bairro, cidade, estado,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct EnderecoRepository {
    pool: PgPool,
}

impl EnderecoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnderecoStore for EnderecoRepository {
    async fn list(&self) -> Result<Vec<Endereco>, AppError> {
        let sql = format!("SELECT {ENDERECO_COLUMNS} FROM enderecos ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, Endereco>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Endereco>, AppError> {
        let sql = format!("SELECT {ENDERECO_COLUMNS} FROM enderecos WHERE id = $1");
        let row = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Option<Endereco>, AppError> {
        let sql = format!("SELECT {ENDERECO_COLUMNS} FROM enderecos WHERE client_id = $1");
        let row = sqlx::query_as::<_, Endereco>(&sql)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, new: NewEndereco) -> Result<Endereco, AppError> {
        let sql = format!(
            r#"
            INSERT INTO enderecos (client_id, cep, endereco, numero, complemento, bairro, cidade, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ENDERECO_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Endereco>(&sql)
            .bind(new.client_id)
            .bind(&new.cep)
            .bind(&new.lookup.endereco)
            .bind(&new.numero)
            .bind(&new.complemento)
            .bind(&new.lookup.bairro)
            .bind(&new.lookup.cidade)
            .bind(&new.lookup.estado)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, messages::ADDRESS_EXISTS))
    }

    async fn update(&self, id: Uuid, changes: EnderecoChanges) -> Result<Option<Endereco>, AppError> {
        // Um novo CEP traz os campos derivados junto; sem CEP eles ficam como estão
        let lookup = changes.lookup.unwrap_or_default();
        let sql = format!(
            r#"
            UPDATE enderecos SET
                cep = COALESCE($2, cep),
                numero = COALESCE($3, numero),
                complemento = COALESCE($4, complemento),
                endereco = COALESCE($5, endereco),
                bairro = COALESCE($6, bairro),
                cidade = COALESCE($7, cidade),
                estado = COALESCE($8, estado),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ENDERECO_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .bind(&changes.cep)
            .bind(&changes.numero)
            .bind(&changes.complemento)
            .bind(&lookup.endereco)
            .bind(&lookup.bairro)
            .bind(&lookup.cidade)
            .bind(&lookup.estado)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM enderecos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
