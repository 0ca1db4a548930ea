// src/services/processo_service.rs

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination},
    db::ProcessoStore,
    models::{
        auth::Principal,
        processo::{CreateProcessoPayload, Processo, UpdateProcessoPayload},
    },
    services::{
        authorization::{ensure_staff, Action, ResourceKind},
        cache::ResponseCache,
        validators::EntityValidator,
    },
};

const LIST_PATTERN: &str = "processos:list:*";

fn detail_key(id: Uuid) -> String {
    format!("processo:{}", id)
}

fn list_key(page: Pagination) -> String {
    format!("processos:list:{}:{}", page.limit, page.offset)
}

#[derive(Clone)]
pub struct ProcessoService {
    processos: Arc<dyn ProcessoStore>,
    validator: EntityValidator,
    cache: Arc<dyn ResponseCache>,
    cache_ttl_seconds: u64,
}

impl ProcessoService {
    pub fn new(
        processos: Arc<dyn ProcessoStore>,
        validator: EntityValidator,
        cache: Arc<dyn ResponseCache>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            processos,
            validator,
            cache,
            cache_ttl_seconds,
        }
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!("📦 Cache hit: {}", key);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("⚠️ Entrada de cache ilegível ({}): {}", key, e);
                None
            }
        }
    }

    async fn remember<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.cache.set(key, &raw, self.cache_ttl_seconds).await,
            Err(e) => tracing::warn!("⚠️ Falha ao serializar para o cache ({}): {}", key, e),
        }
    }

    async fn invalidate(&self, id: Uuid) {
        self.cache.delete(&detail_key(id)).await;
        self.cache.delete_pattern(LIST_PATTERN).await;
    }

    pub async fn list(&self, principal: &Principal, page: Pagination) -> Result<Vec<Processo>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Processo)?;

        let key = list_key(page);
        if let Some(processos) = self.cached::<Vec<Processo>>(&key).await {
            return Ok(processos);
        }

        let processos = self.processos.list(page).await?;
        self.remember(&key, &processos).await;
        Ok(processos)
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<Processo, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Processo)?;

        let key = detail_key(id);
        if let Some(processo) = self.cached::<Processo>(&key).await {
            return Ok(processo);
        }

        let processo = self.validator.ensure_processo_exists(id).await?;
        self.remember(&key, &processo).await;
        Ok(processo)
    }

    pub async fn create(&self, principal: &Principal, payload: CreateProcessoPayload) -> Result<Processo, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::Processo)?;

        self.validator.ensure_client_exists(payload.client_id).await?;
        self.validator
            .ensure_responsavel_exists(payload.responsavel_id)
            .await?;
        self.validator
            .ensure_processo_number_available(payload.numero_processo, None)
            .await?;

        let processo = self.processos.create(&payload).await?;
        self.invalidate(processo.id).await;

        tracing::info!("⚖️ Processo {} criado ({})", processo.numero_processo, processo.id);
        Ok(processo)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateProcessoPayload,
    ) -> Result<Processo, AppError> {
        ensure_staff(principal, Action::Update, ResourceKind::Processo)?;

        self.validator.ensure_processo_exists(id).await?;
        if let Some(numero) = payload.numero_processo {
            self.validator
                .ensure_processo_number_available(numero, Some(id))
                .await?;
        }
        if let Some(client_id) = payload.client_id {
            self.validator.ensure_client_exists(client_id).await?;
        }
        if let Some(responsavel_id) = payload.responsavel_id {
            self.validator.ensure_responsavel_exists(responsavel_id).await?;
        }

        let processo = self
            .processos
            .update(id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_PROCESSO.into()))?;
        self.invalidate(id).await;
        Ok(processo)
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::Processo)?;

        self.validator.ensure_processo_exists(id).await?;
        self.processos.delete(id).await?;
        self.invalidate(id).await;

        tracing::info!("🗑️ Processo removido: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{auth::Role, processo::ProcessoStatus},
        test_support::{principal, processo_payload, TestHarness},
    };

    #[tokio::test]
    async fn duplicate_number_conflicts_but_self_update_keeps_it() {
        let h = TestHarness::new();
        let staff = principal(Role::Collaborator, Uuid::new_v4());
        let (client_id, responsavel_id) = h.seed_client_and_lawyer().await;

        let first = h
            .state
            .processo_service
            .create(&staff, processo_payload(5001, client_id, responsavel_id))
            .await
            .unwrap();

        let err = h
            .state
            .processo_service
            .create(&staff, processo_payload(5001, client_id, responsavel_id))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::PROCESSO_NUMBER_EXISTS);

        let updated = h
            .state
            .processo_service
            .update(
                &staff,
                first.id,
                UpdateProcessoPayload {
                    numero_processo: Some(5001),
                    status: Some(ProcessoStatus::Suspenso),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.numero_processo, 5001);
        assert_eq!(updated.status, ProcessoStatus::Suspenso);
    }

    #[tokio::test]
    async fn unknown_responsavel_is_not_found() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;

        let err = h
            .state
            .processo_service
            .create(&staff, processo_payload(7, client_id, Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::NOT_FOUND_RESPONSAVEL);
    }

    #[tokio::test]
    async fn writes_invalidate_cached_reads() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        let (client_id, responsavel_id) = h.seed_client_and_lawyer().await;
        let page = Pagination::default();

        let processo = h
            .state
            .processo_service
            .create(&staff, processo_payload(900, client_id, responsavel_id))
            .await
            .unwrap();

        h.state.processo_service.list(&staff, page).await.unwrap();
        h.state.processo_service.find_one(&staff, processo.id).await.unwrap();
        assert!(h.cache.contains(&list_key(page)));
        assert!(h.cache.contains(&detail_key(processo.id)));

        h.state
            .processo_service
            .update(
                &staff,
                processo.id,
                UpdateProcessoPayload {
                    tribunal: Some("TRT4".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!h.cache.contains(&list_key(page)));
        assert!(!h.cache.contains(&detail_key(processo.id)));

        let fresh = h.state.processo_service.find_one(&staff, processo.id).await.unwrap();
        assert_eq!(fresh.tribunal.as_deref(), Some("TRT4"));
    }

    #[tokio::test]
    async fn clients_cannot_touch_processos() {
        let h = TestHarness::new();
        let client = principal(Role::Client, Uuid::new_v4());
        let err = h
            .state
            .processo_service
            .list(&client, Pagination::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
