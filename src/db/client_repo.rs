// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::{map_unique_violation, AppError},
        messages,
        pagination::Pagination,
    },
    models::client::{Client, ClientChanges, NewClient},
};

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list(&self, page: Pagination, search: Option<&str>) -> Result<Vec<Client>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError>;
    async fn create(&self, new: NewClient) -> Result<Client, AppError>;
    async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<Option<Client>, AppError>;
    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<Option<Client>, AppError>;
    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const CLIENT_COLUMNS: &str = r#"
    id, name, email, password, avatar, cpf, phone, birth_date, sex,
    role, status, created_at, updated_at
"#;

/// Padrão `ILIKE` de "contém": `%` e `_` digitados pelo usuário valem como texto literal.
/// Sem busca, o padrão '%%' casa com tudo.
fn contains_pattern(search: Option<&str>) -> String {
    let mut pattern = String::from("%");
    for ch in search.unwrap_or_default().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// Todas as interações com a tabela 'clients'
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn list(&self, page: Pagination, search: Option<&str>) -> Result<Vec<Client>, AppError> {
        let pattern = contains_pattern(search);
        let sql = format!(
            r#"
            SELECT {CLIENT_COLUMNS}
            FROM clients
            WHERE name ILIKE $1 ESCAPE '\'
               OR email ILIKE $1 ESCAPE '\'
               OR cpf ILIKE $1 ESCAPE '\'
               OR phone ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let clients = sqlx::query_as::<_, Client>(&sql)
            .bind(pattern)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE cpf = $1");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn create(&self, new: NewClient) -> Result<Client, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clients (name, email, password, avatar, cpf, phone, birth_date, sex, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CLIENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Client>(&sql)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(&new.avatar)
            .bind(&new.cpf)
            .bind(&new.phone)
            .bind(new.birth_date)
            .bind(&new.sex)
            .bind(new.role)
            .bind(new.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, messages::CLIENT_EXISTS))
    }

    async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<Option<Client>, AppError> {
        // COALESCE: campo ausente mantém o valor atual
        let sql = format!(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                cpf = COALESCE($5, cpf),
                phone = COALESCE($6, phone),
                birth_date = COALESCE($7, birth_date),
                sex = COALESCE($8, sex),
                role = COALESCE($9, role),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.cpf)
            .bind(changes.phone)
            .bind(changes.birth_date)
            .bind(changes.sex)
            .bind(changes.role)
            .bind(changes.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, messages::CLIENT_EXISTS))
    }

    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<Option<Client>, AppError> {
        let sql = format!(
            "UPDATE clients SET avatar = $2, updated_at = NOW() WHERE id = $1 RETURNING {CLIENT_COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .bind(avatar_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE clients SET password = $2, updated_at = NOW() WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
