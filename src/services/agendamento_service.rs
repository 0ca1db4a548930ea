// src/services/agendamento_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination},
    db::AgendamentoStore,
    models::{
        agendamento::{Agendamento, CreateAgendamentoPayload, UpdateAgendamentoPayload},
        auth::Principal,
    },
    services::{
        authorization::{ensure_staff, Action, ResourceKind},
        scheduling::check_slot,
        validators::EntityValidator,
    },
};

#[derive(Clone)]
pub struct AgendamentoService {
    agendamentos: Arc<dyn AgendamentoStore>,
    validator: EntityValidator,
}

impl AgendamentoService {
    pub fn new(agendamentos: Arc<dyn AgendamentoStore>, validator: EntityValidator) -> Self {
        Self {
            agendamentos,
            validator,
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<Agendamento, AppError> {
        self.agendamentos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_AGENDAMENTO.into()))
    }

    pub async fn list(&self, principal: &Principal, page: Pagination) -> Result<Vec<Agendamento>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Agendamento)?;
        self.agendamentos.list(page).await
    }

    pub async fn list_by_client(
        &self,
        principal: &Principal,
        client_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<Agendamento>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Agendamento)?;
        self.validator.ensure_client_exists(client_id).await?;
        self.agendamentos.list_by_client(client_id, page).await
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<Agendamento, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Agendamento)?;
        self.find_existing(id).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        payload: CreateAgendamentoPayload,
    ) -> Result<Agendamento, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::Agendamento)?;
        self.validator.ensure_client_exists(payload.client_id).await?;

        check_slot(
            self.agendamentos.as_ref(),
            payload.client_id,
            payload.data_hora,
            None,
            Utc::now(),
        )
        .await?;

        let agendamento = self.agendamentos.create(&payload).await?;
        tracing::info!(
            "📅 Agendamento {} marcado para {} (cliente {})",
            agendamento.id,
            agendamento.data_hora,
            agendamento.client_id
        );
        Ok(agendamento)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateAgendamentoPayload,
    ) -> Result<Agendamento, AppError> {
        ensure_staff(principal, Action::Update, ResourceKind::Agendamento)?;
        let current = self.find_existing(id).await?;

        // Só a remarcação passa pela checagem de horário
        if let Some(data_hora) = payload.data_hora {
            check_slot(
                self.agendamentos.as_ref(),
                current.client_id,
                data_hora,
                Some(id),
                Utc::now(),
            )
            .await?;
        }

        self.agendamentos
            .update(id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_AGENDAMENTO.into()))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::Agendamento)?;
        self.validator.ensure_agendamento_exists(id).await?;
        self.agendamentos.delete(id).await?;
        tracing::info!("🗑️ Agendamento cancelado: {}", id);
        Ok(())
    }
}
