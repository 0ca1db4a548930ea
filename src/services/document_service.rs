// src/services/document_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination, upload::UploadedFile},
    db::DocumentStore,
    models::{
        auth::Principal,
        document::{Document, NewDocument, UpdateDocumentPayload},
    },
    services::{
        authorization::{ensure_staff, Action, ResourceKind},
        storage::ObjectStorage,
        validators::EntityValidator,
    },
};

pub const DOCUMENT_FOLDER: &str = "documents";

#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    validator: EntityValidator,
    storage: Arc<dyn ObjectStorage>,
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        validator: EntityValidator,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            documents,
            validator,
            storage,
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<Document, AppError> {
        self.documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_DOCUMENT.into()))
    }

    pub async fn list(&self, principal: &Principal, page: Pagination) -> Result<Vec<Document>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Document)?;
        self.documents.list(page).await
    }

    pub async fn list_by_client(&self, principal: &Principal, client_id: Uuid) -> Result<Vec<Document>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Document)?;
        self.validator.ensure_client_exists(client_id).await?;
        self.documents.list_by_client(client_id).await
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<Document, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Document)?;
        self.find_existing(id).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        client_id: Uuid,
        name: String,
        file: UploadedFile,
    ) -> Result<Document, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::Document)?;
        self.validator.ensure_client_exists(client_id).await?;

        let stored = self.storage.upload(&file, DOCUMENT_FOLDER).await?;
        let created = self
            .documents
            .create(NewDocument {
                client_id,
                name,
                file_url: stored.url,
                file_key: stored.key.clone(),
                file_size: Some(file.size() as i64),
                mime_type: Some(file.content_type.clone()),
            })
            .await;

        match created {
            Ok(document) => {
                tracing::info!("📄 Documento {} enviado para o cliente {}", document.id, client_id);
                Ok(document)
            }
            Err(e) => {
                // Não deixa arquivo órfão no bucket
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
        payload: UpdateDocumentPayload,
    ) -> Result<Document, AppError> {
        ensure_staff(principal, Action::Update, ResourceKind::Document)?;
        self.documents
            .update(id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_DOCUMENT.into()))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::Document)?;
        let document = self.find_existing(id).await?;

        self.storage.delete(&document.file_key).await?;
        self.documents.delete(id).await?;

        tracing::info!("🗑️ Documento removido: {} ({})", id, document.file_key);
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

    #[tokio::test]
    async fn upload_then_delete_removes_stored_object() {
        let h = TestHarness::new();
        let staff = principal(Role::Collaborator, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;

        let document = h
            .state
            .document_service
            .create(&staff, client_id, "Contrato".into(), pdf_file())
            .await
            .unwrap();
        assert!(document.file_key.starts_with("documents/"));
        assert_eq!(document.mime_type.as_deref(), Some("application/pdf"));

        let listed = h
            .state
            .document_service
            .list_by_client(&staff, client_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        h.state.document_service.delete(&staff, document.id).await.unwrap();
        assert!(h.storage.was_deleted(&document.file_key));

        let err = h
            .state
            .document_service
            .find_one(&staff, document.id)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::NOT_FOUND_DOCUMENT);
    }

    #[tokio::test]
    async fn unknown_client_uploads_nothing() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());

        let err = h
            .state
            .document_service
            .create(&staff, Uuid::new_v4(), "RG".into(), pdf_file())
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::NOT_FOUND_CLIENT);
        assert_eq!(h.storage.upload_count(), 0);
    }
}
