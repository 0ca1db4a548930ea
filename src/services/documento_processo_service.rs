// src/services/documento_processo_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination, upload::UploadedFile},
    db::DocumentoProcessoStore,
    models::{
        auth::Principal,
        documento_processo::{DocumentoProcesso, NewDocumentoProcesso, UpdateDocumentoProcessoPayload},
    },
    services::{
        authorization::{ensure_staff, Action, ResourceKind},
        storage::ObjectStorage,
        validators::EntityValidator,
    },
};

pub const DOCUMENTO_PROCESSO_FOLDER: &str = "documentos-processo";

/// Campos de texto enviados junto com o arquivo.
#[derive(Debug, Clone)]
pub struct DocumentoProcessoUpload {
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo: Option<String>,
}

#[derive(Clone)]
pub struct DocumentoProcessoService {
    documentos: Arc<dyn DocumentoProcessoStore>,
    validator: EntityValidator,
    storage: Arc<dyn ObjectStorage>,
}

impl DocumentoProcessoService {
    pub fn new(
        documentos: Arc<dyn DocumentoProcessoStore>,
        validator: EntityValidator,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            documentos,
            validator,
            storage,
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<DocumentoProcesso, AppError> {
        self.documentos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_DOCUMENTO_PROCESSO.into()))
    }

    pub async fn list(&self, principal: &Principal, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::DocumentoProcesso)?;
        self.documentos.list(page).await
    }

    pub async fn list_by_processo(
        &self,
        principal: &Principal,
        processo_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<DocumentoProcesso>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::DocumentoProcesso)?;
        self.validator.ensure_processo_exists(processo_id).await?;
        self.documentos.list_by_processo(processo_id, page).await
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<DocumentoProcesso, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::DocumentoProcesso)?;
        self.find_existing(id).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        processo_id: Uuid,
        fields: DocumentoProcessoUpload,
        file: UploadedFile,
    ) -> Result<DocumentoProcesso, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::DocumentoProcesso)?;
        self.validator.ensure_processo_exists(processo_id).await?;

        let stored = self.storage.upload(&file, DOCUMENTO_PROCESSO_FOLDER).await?;
        let created = self
            .documentos
            .create(NewDocumentoProcesso {
                processo_id,
                nome: fields.nome,
                descricao: fields.descricao,
                tipo: fields.tipo,
                file_url: stored.url,
                file_key: stored.key.clone(),
                file_size: Some(file.size() as i64),
                mime_type: Some(file.content_type.clone()),
            })
            .await;

        match created {
            Ok(documento) => {
                tracing::info!("📎 Documento {} anexado ao processo {}", documento.id, processo_id);
                Ok(documento)
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
        payload: UpdateDocumentoProcessoPayload,
    ) -> Result<DocumentoProcesso, AppError> {
        ensure_staff(principal, Action::Update, ResourceKind::DocumentoProcesso)?;
        self.documentos
            .update(id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_DOCUMENTO_PROCESSO.into()))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::DocumentoProcesso)?;
        let documento = self.find_existing(id).await?;

        self.storage.delete(&documento.file_key).await?;
        self.documentos.delete(id).await?;

        tracing::info!("🗑️ Documento do processo removido: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::Role,
        test_support::{pdf_file, principal, processo_payload, TestHarness},
    };

    fn peticao() -> DocumentoProcessoUpload {
        DocumentoProcessoUpload {
            nome: "Petição inicial".into(),
            descricao: None,
            tipo: Some("PETICAO".into()),
        }
    }

    #[tokio::test]
    async fn attaches_and_lists_by_processo() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        let (client_id, responsavel_id) = h.seed_client_and_lawyer().await;
        let processo = h
            .state
            .processo_service
            .create(&staff, processo_payload(321, client_id, responsavel_id))
            .await
            .unwrap();

        let documento = h
            .state
            .documento_processo_service
            .create(&staff, processo.id, peticao(), pdf_file())
            .await
            .unwrap();
        assert!(documento.file_key.starts_with("documentos-processo/"));

        let listed = h
            .state
            .documento_processo_service
            .list_by_processo(&staff, processo.id, Pagination::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tipo.as_deref(), Some("PETICAO"));

        h.state
            .documento_processo_service
            .delete(&staff, documento.id)
            .await
            .unwrap();
        assert!(h.storage.was_deleted(&documento.file_key));
    }

    #[tokio::test]
    async fn unknown_processo_is_not_found() {
        let h = TestHarness::new();
        let staff = principal(Role::Collaborator, Uuid::new_v4());
        let err = h
            .state
            .documento_processo_service
            .create(&staff, Uuid::new_v4(), peticao(), pdf_file())
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::NOT_FOUND_PROCESSO);
    }
}
