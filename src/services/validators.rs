// src/services/validators.rs
// Checagens de existência e unicidade feitas antes de cada escrita.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::{AgendamentoStore, ClientStore, EnderecoStore, ProcessoStore, UserStore},
    models::{client::Client, processo::Processo, user::User},
};

/// Em qual tabela o e-mail precisa estar livre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOwner {
    Client,
    User,
}

#[derive(Clone)]
pub struct EntityValidator {
    clients: Arc<dyn ClientStore>,
    users: Arc<dyn UserStore>,
    processos: Arc<dyn ProcessoStore>,
    agendamentos: Arc<dyn AgendamentoStore>,
    enderecos: Arc<dyn EnderecoStore>,
}

impl EntityValidator {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        users: Arc<dyn UserStore>,
        processos: Arc<dyn ProcessoStore>,
        agendamentos: Arc<dyn AgendamentoStore>,
        enderecos: Arc<dyn EnderecoStore>,
    ) -> Self {
        Self {
            clients,
            users,
            processos,
            agendamentos,
            enderecos,
        }
    }

    pub async fn ensure_client_exists(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_CLIENT.into()))
    }

    pub async fn ensure_user_exists(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_USER.into()))
    }

    /// Responsável por um processo precisa ser um usuário da equipe.
    pub async fn ensure_responsavel_exists(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_RESPONSAVEL.into()))
    }

    pub async fn ensure_processo_exists(&self, id: Uuid) -> Result<Processo, AppError> {
        self.processos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_PROCESSO.into()))
    }

    pub async fn ensure_agendamento_exists(&self, id: Uuid) -> Result<(), AppError> {
        match self.agendamentos.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(messages::NOT_FOUND_AGENDAMENTO.into())),
        }
    }

    /// `exclude_id` permite que o próprio registro mantenha o e-mail numa atualização.
    pub async fn ensure_email_available(
        &self,
        email: &str,
        owner: EmailOwner,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let (taken_by, conflict_message) = match owner {
            EmailOwner::Client => (
                self.clients.find_by_email(email).await?.map(|c| c.id),
                messages::CLIENT_EXISTS,
            ),
            EmailOwner::User => (
                self.users.find_by_email(email).await?.map(|u| u.id),
                messages::USER_EXISTS,
            ),
        };

        match taken_by {
            Some(id) if Some(id) != exclude_id => Err(AppError::Conflict(conflict_message.into())),
            _ => Ok(()),
        }
    }

    pub async fn ensure_cpf_available(&self, cpf: &str, exclude_id: Option<Uuid>) -> Result<(), AppError> {
        match self.clients.find_by_cpf(cpf).await? {
            Some(c) if Some(c.id) != exclude_id => Err(AppError::Conflict(messages::CPF_EXISTS.into())),
            _ => Ok(()),
        }
    }

    pub async fn ensure_processo_number_available(
        &self,
        numero_processo: i64,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        match self.processos.find_by_numero(numero_processo).await? {
            Some(p) if Some(p.id) != exclude_id => {
                Err(AppError::Conflict(messages::PROCESSO_NUMBER_EXISTS.into()))
            }
            _ => Ok(()),
        }
    }

    pub async fn ensure_client_has_no_address(&self, client_id: Uuid) -> Result<(), AppError> {
        match self.enderecos.find_by_client(client_id).await? {
            Some(_) => Err(AppError::Conflict(messages::ADDRESS_EXISTS.into())),
            None => Ok(()),
        }
    }
}
