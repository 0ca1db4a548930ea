// src/services/endereco_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::EnderecoStore,
    models::{
        auth::Principal,
        endereco::{
            normalize_cep, CreateEnderecoPayload, Endereco, EnderecoChanges, NewEndereco,
            UpdateEnderecoPayload,
        },
    },
    services::{
        authorization::{ensure_allowed, ensure_staff, Action, FieldChanges, ResourceKind, ResourceRef},
        validators::EntityValidator,
        viacep::AddressLookup,
    },
};

#[derive(Clone)]
pub struct EnderecoService {
    enderecos: Arc<dyn EnderecoStore>,
    validator: EntityValidator,
    lookup: Arc<dyn AddressLookup>,
}

impl EnderecoService {
    pub fn new(enderecos: Arc<dyn EnderecoStore>, validator: EntityValidator, lookup: Arc<dyn AddressLookup>) -> Self {
        Self {
            enderecos,
            validator,
            lookup,
        }
    }

    async fn find_existing(&self, id: Uuid) -> Result<Endereco, AppError> {
        self.enderecos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_ENDERECO.into()))
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<Endereco>, AppError> {
        ensure_staff(principal, Action::Read, ResourceKind::Endereco)?;
        self.enderecos.list().await
    }

    // O dono só é conhecido depois da busca
    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<Endereco, AppError> {
        let endereco = self.find_existing(id).await?;
        ensure_allowed(
            principal,
            Action::Read,
            ResourceRef::new(ResourceKind::Endereco, endereco.client_id),
            &FieldChanges::none(),
        )?;
        Ok(endereco)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        client_id: Uuid,
        payload: CreateEnderecoPayload,
    ) -> Result<Endereco, AppError> {
        ensure_staff(principal, Action::Create, ResourceKind::Endereco)?;
        self.validator.ensure_client_exists(client_id).await?;
        self.validator.ensure_client_has_no_address(client_id).await?;

        let cep = normalize_cep(&payload.cep);
        let lookup = self.lookup.lookup(&cep).await?;

        let endereco = self
            .enderecos
            .create(NewEndereco {
                client_id,
                cep,
                numero: payload.numero,
                complemento: payload.complemento,
                lookup,
            })
            .await?;

        tracing::info!("🏠 Endereço cadastrado para o cliente {}", client_id);
        Ok(endereco)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateEnderecoPayload,
    ) -> Result<Endereco, AppError> {
        let current = self.find_existing(id).await?;
        ensure_allowed(
            principal,
            Action::Update,
            ResourceRef::new(ResourceKind::Endereco, current.client_id),
            &FieldChanges::none(),
        )?;

        // CEP novo: os campos de logradouro vêm de novo da consulta
        let cep = payload.cep.as_deref().map(normalize_cep);
        let lookup = match cep.as_deref() {
            Some(cep) => Some(self.lookup.lookup(cep).await?),
            None => None,
        };

        self.enderecos
            .update(
                id,
                EnderecoChanges {
                    cep,
                    numero: payload.numero,
                    complemento: payload.complemento,
                    lookup,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_ENDERECO.into()))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_staff(principal, Action::Delete, ResourceKind::Endereco)?;
        self.find_existing(id).await?;
        self.enderecos.delete(id).await?;
        tracing::info!("🗑️ Endereço removido: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::Role,
        test_support::{principal, TestHarness},
    };

    fn payload(cep: &str) -> CreateEnderecoPayload {
        CreateEnderecoPayload {
            cep: cep.into(),
            numero: "100".into(),
            complemento: None,
        }
    }

    #[tokio::test]
    async fn create_fills_fields_from_cep_and_allows_one_per_client() {
        let h = TestHarness::new();
        let staff = principal(Role::Collaborator, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;

        let endereco = h
            .state
            .endereco_service
            .create(&staff, client_id, payload("90010-000"))
            .await
            .unwrap();
        assert_eq!(endereco.cep, "90010000");
        assert_eq!(endereco.cidade.as_deref(), Some("Porto Alegre"));

        let err = h
            .state
            .endereco_service
            .create(&staff, client_id, payload("90010000"))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::ADDRESS_EXISTS);
    }

    #[tokio::test]
    async fn client_reads_own_address_only() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;
        let endereco = h
            .state
            .endereco_service
            .create(&staff, client_id, payload("90010000"))
            .await
            .unwrap();

        let owner = principal(Role::Client, client_id);
        let found = h.state.endereco_service.find_one(&owner, endereco.id).await.unwrap();
        assert_eq!(found.id, endereco.id);

        let stranger = principal(Role::Client, Uuid::new_v4());
        let err = h
            .state
            .endereco_service
            .update(&stranger, endereco.id, UpdateEnderecoPayload::default())
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::UPDATE_OWN_ADDRESS);
    }

    #[tokio::test]
    async fn unknown_cep_is_not_found() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        let (client_id, _) = h.seed_client_and_lawyer().await;

        let err = h
            .state
            .endereco_service
            .create(&staff, client_id, payload("00000000"))
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), messages::NOT_FOUND_CEP);
    }
}
