// src/services/boleto_service.rs

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination, upload::UploadedFile},
    db::BoletoStore,
    models::{
        auth::Principal,
        boleto::{Boleto, NewBoleto, UpdateBoletoPayload},
    },
    services::{
        authorization::{ensure_staff, Action, ResourceKind},
        storage::ObjectStorage,
        validators::EntityValidator,
    },
};

pub const BOLETO_FOLDER: &str = "boletos";

/// Campos de texto do formulário de envio de boleto.
#[derive(Debug, Clone)]
pub struct BoletoUpload {
    pub titulo: String,
    pub observacao: Option<String>,
    pub data_vencimento: DateTime<Utc>,
}

/// Aceita ISO-8601 completo ou só a data (vencimento à meia-noite UTC).
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::BadRequest("dataVencimento must be a valid ISO 8601 date string".into()))
}

#[derive(Clone)]
pub struct BoletoService {
    boletos: Arc<dyn BoletoStore>,
    validator: EntityValidator,
    storage: Arc<dyn ObjectStorage>,
}

impl BoletoService {
    pub fn new(boletos: Arc<dyn BoletoStore>, validator: EntityValidator, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            boletos,
            validator,
            storage,
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<Boleto, AppError> {
        self.boletos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_BOLETO.into()))
    }

    pub async fn list(&self, principal: &Principal, page: Pagination) -> Result<Vec<Boleto>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Boleto)?;
        self.boletos.list(page).await
    }

    pub async fn list_by_client(
        &self,
        principal: &Principal,
        client_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<Boleto>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Boleto)?;
        self.validator.ensure_client_exists(client_id).await?;
        self.boletos.list_by_client(client_id, page).await
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<Boleto, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Boleto)?;
        self.find_existing(id).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        client_id: Uuid,
        fields: BoletoUpload,
        file: UploadedFile,
    ) -> Result<Boleto, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::Boleto)?;
        self.validator.ensure_client_exists(client_id).await?;

        let stored = self.storage.upload(&file, BOLETO_FOLDER).await?;
        let created = self
            .boletos
            .create(NewBoleto {
                client_id,
                titulo: fields.titulo,
                observacao: fields.observacao,
                data_vencimento: fields.data_vencimento,
                file_url: stored.url,
                file_key: stored.key.clone(),
                file_size: Some(file.size() as i64),
                mime_type: Some(file.content_type.clone()),
            })
            .await;

        match created {
            Ok(boleto) => {
                tracing::info!("💸 Boleto {} criado para o cliente {}", boleto.id, client_id);
                Ok(boleto)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&stored.key).await {
                    tracing::warn!("⚠️ Arquivo órfão {}: {}", stored.key, cleanup);
                }
                Err(e)
            }
        }
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateBoletoPayload,
    ) -> Result<Boleto, AppError> {
        ensure_staff(principal, Action::Update, ResourceKind::Boleto)?;
        self.boletos
            .update(id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_BOLETO.into()))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::Boleto)?;
        let boleto = self.find_existing(id).await?;

        self.storage.delete(&boleto.file_key).await?;
        self.boletos.delete(id).await?;

        tracing::info!("🗑️ Boleto removido: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::Role,
        test_support::{pdf_file, principal, TestHarness},
    };
    use chrono::TimeZone;

    #[test]
    fn due_date_accepts_date_only_and_full_instants() {
        assert_eq!(
            parse_due_date("2026-03-10").unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_due_date("2026-03-10T15:30:00-03:00").unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 10, 18, 30, 0).unwrap()
        );
        assert!(matches!(parse_due_date("10/03/2026"), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn new_boleto_is_active_and_can_be_settled() {
        let h = TestHarness::new();
        let staff = principal(Role::Collaborator, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;

        let boleto = h
            .state
            .boleto_service
            .create(
                &staff,
                client_id,
                BoletoUpload {
                    titulo: "Honorários março".into(),
                    observacao: None,
                    data_vencimento: parse_due_date("2026-03-10").unwrap(),
                },
                pdf_file(),
            )
            .await
            .unwrap();
        assert!(boleto.status);
        assert!(boleto.file_key.starts_with("boletos/"));

        let settled = h
            .state
            .boleto_service
            .update(
                &staff,
                boleto.id,
                UpdateBoletoPayload {
                    status: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!settled.status);
        assert_eq!(settled.titulo, "Honorários março");

        h.state.boleto_service.delete(&staff, boleto.id).await.unwrap();
        assert!(h.storage.was_deleted(&boleto.file_key));
    }
}
