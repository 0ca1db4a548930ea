// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::{error::AppError, messages},
    models::auth::{Principal, Role},
};

/// 1. O Trait que define quais papéis uma rota aceita
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// 2. O Extractor (Guardião). Entrega o principal já checado.
pub struct RequireRole<T>(pub Principal, pub PhantomData<T>);

impl<T> RequireRole<T> {
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Principal colocado pelo `auth_guard`
        let principal = parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Papel aceito pela rota?
        if !T::allowed().contains(&principal.role) {
            tracing::warn!(
                "⛔ {:?} {} bloqueado por papel ({:?})",
                principal.role,
                parts.uri.path(),
                T::allowed()
            );
            return Err(AppError::Forbidden(messages::NO_PERMISSION.into()));
        }

        Ok(RequireRole(principal, PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CONJUNTOS DE PAPÉIS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleSet for AdminOnly {
    fn allowed() -> &'static [Role] { &[Role::Admin] }
}

pub struct StaffOnly;
impl RoleSet for StaffOnly {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::Collaborator] }
}

pub struct AnyRole;
impl RoleSet for AnyRole {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::Collaborator, Role::Client] }
}
