// src/services/authorization.rs
// Regras de acesso por papel. Funções puras: sem I/O, sem estado.

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    models::auth::{Principal, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Client,
    User,
    Processo,
    Document,
    DocumentoProcesso,
    Boleto,
    Agendamento,
    Endereco,
}

/// Recurso alvo. `owner_id` é o id do cliente/usuário dono do registro, quando existe.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub owner_id: Option<Uuid>,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, owner_id: Uuid) -> Self {
        Self {
            kind,
            owner_id: Some(owner_id),
        }
    }

    pub fn unowned(kind: ResourceKind) -> Self {
        Self { kind, owner_id: None }
    }
}

/// Só o campo `role` importa para a checagem de escalonamento.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldChanges {
    pub requested_role: Option<Role>,
    pub current_role: Option<Role>,
}

impl FieldChanges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn role(requested: Option<Role>, current: Role) -> Self {
        Self {
            requested_role: requested,
            current_role: Some(current),
        }
    }

    fn changes_role(&self) -> bool {
        matches!(self.requested_role, Some(r) if Some(r) != self.current_role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbidden(&'static str),
}

impl Decision {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Forbidden(reason) => Err(AppError::Forbidden(reason.to_string())),
        }
    }
}

pub fn authorize(
    principal: &Principal,
    action: Action,
    resource: ResourceRef,
    changes: &FieldChanges,
) -> Decision {
    let decision = match principal.role {
        Role::Admin => Decision::Allow,
        Role::Collaborator => role_guard(changes),
        Role::Client => {
            let is_owner = resource.owner_id == Some(principal.subject_id);
            match (resource.kind, action) {
                (ResourceKind::Client | ResourceKind::Endereco, Action::Read | Action::Update)
                    if is_owner =>
                {
                    role_guard(changes)
                }
                (ResourceKind::Client, Action::Read) => Decision::Forbidden(messages::VIEW_OWN_DATA),
                (ResourceKind::Client, Action::Update) => Decision::Forbidden(messages::UPDATE_OWN_DATA),
                (ResourceKind::Endereco, Action::Read) => Decision::Forbidden(messages::VIEW_OWN_ADDRESS),
                (ResourceKind::Endereco, Action::Update) => Decision::Forbidden(messages::UPDATE_OWN_ADDRESS),
                _ => Decision::Forbidden(messages::NO_PERMISSION),
            }
        }
    };

    if let Decision::Forbidden(reason) = &decision {
        tracing::warn!(
            "⛔ Acesso negado: {:?} {:?} {:?} por {} ({:?}): {}",
            action,
            resource.kind,
            resource.owner_id,
            principal.subject_id,
            principal.role,
            reason
        );
    }

    decision
}

/// Atalho para os serviços: `authorize(..).into_result()`.
pub fn ensure_allowed(
    principal: &Principal,
    action: Action,
    resource: ResourceRef,
    changes: &FieldChanges,
) -> Result<(), AppError> {
    authorize(principal, action, resource, changes).into_result()
}

/// Recursos sem dono direto (processos, boletos, agenda...): só a equipe opera.
pub fn ensure_staff(principal: &Principal, action: Action, kind: ResourceKind) -> Result<(), AppError> {
    ensure_allowed(principal, action, ResourceRef::unowned(kind), &FieldChanges::none())
}

fn role_guard(changes: &FieldChanges) -> Decision {
    if changes.changes_role() {
        Decision::Forbidden(messages::CANNOT_CHANGE_ROLE)
    } else {
        Decision::Allow
    }
}
