// src/services/password_reset_service.rs
// Fluxo: pedido (gera token de 1h e envia e-mail) -> redefinição (consome o token uma única vez).

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;

use crate::{
    common::{error::AppError, messages},
    db::{ClientStore, PasswordResetStore, UserStore},
    services::{
        email::{EmailSender, PasswordResetEmail},
        hashing::PasswordHasher,
    },
};

const TOKEN_BYTES: usize = 32;

pub fn token_lifetime() -> Duration {
    Duration::hours(1)
}

/// 32 bytes aleatórios em hexadecimal (64 caracteres).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Remetente e base do link enviados no e-mail.
#[derive(Debug, Clone)]
pub struct ResetEmailSettings {
    pub from: String,
    pub frontend_url: String,
}

#[derive(Clone)]
pub struct PasswordResetService {
    tokens: Arc<dyn PasswordResetStore>,
    users: Arc<dyn UserStore>,
    clients: Arc<dyn ClientStore>,
    hasher: PasswordHasher,
    email: Arc<dyn EmailSender>,
    settings: ResetEmailSettings,
}

impl PasswordResetService {
    pub fn new(
        tokens: Arc<dyn PasswordResetStore>,
        users: Arc<dyn UserStore>,
        clients: Arc<dyn ClientStore>,
        hasher: PasswordHasher,
        email: Arc<dyn EmailSender>,
        settings: ResetEmailSettings,
    ) -> Self {
        Self {
            tokens,
            users,
            clients,
            hasher,
            email,
            settings,
        }
    }

    /// Pedido feito pelo cliente, identificado pelo CPF.
    pub async fn request_for_client(&self, cpf: &str) -> Result<String, AppError> {
        match self.clients.find_by_cpf(cpf).await? {
            Some(client) => self.issue_and_send(&client.email, &client.name).await?,
            None => tracing::debug!("Pedido de redefinição para CPF desconhecido"),
        }
        Ok(messages::RESET_EMAIL_SENT.to_string())
    }

    /// Pedido feito por um usuário da equipe, identificado pelo e-mail.
    pub async fn request_for_user(&self, email: &str) -> Result<String, AppError> {
        match self.users.find_by_email(email).await? {
            Some(user) => self.issue_and_send(&user.email, &user.name).await?,
            None => tracing::debug!("Pedido de redefinição para e-mail desconhecido"),
        }
        Ok(messages::RESET_EMAIL_SENT.to_string())
    }

    async fn issue_and_send(&self, email: &str, name: &str) -> Result<(), AppError> {
        let token = generate_token();
        self.tokens
            .create(email, &token, Utc::now() + token_lifetime())
            .await?;

        let message = PasswordResetEmail {
            to: email.to_string(),
            name: name.to_string(),
            token,
            from: self.settings.from.clone(),
            frontend_url: self.settings.frontend_url.clone(),
        };

        // A resposta ao chamador é sempre a mesma, então a falha de envio fica só no log
        if let Err(e) = self.email.send_password_reset_email(&message).await {
            tracing::error!("📧 Falha ao enviar e-mail de redefinição para {}: {}", email, e);
        }
        Ok(())
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, AppError> {
        let reset = self
            .tokens
            .find_by_token(token)
            .await?
            .ok_or(AppError::InvalidResetToken)?;

        if Utc::now() > reset.expires_at {
            return Err(AppError::ResetTokenExpired);
        }
        if reset.used {
            return Err(AppError::ResetTokenAlreadyUsed);
        }

        let password_hash = self.hasher.hash(new_password).await?;

        // UPDATE condicional: só um chamador consegue consumir o token
        if !self.tokens.consume(token).await? {
            return Err(AppError::ResetTokenAlreadyUsed);
        }

        if self
            .users
            .update_password_by_email(&reset.email, &password_hash)
            .await?
        {
            tracing::info!("🔑 Senha redefinida (usuário {})", reset.email);
        } else if self
            .clients
            .update_password_by_email(&reset.email, &password_hash)
            .await?
        {
            tracing::info!("🔑 Senha redefinida (cliente {})", reset.email);
        } else {
            tracing::warn!("⚠️ Token válido sem conta associada: {}", reset.email);
            return Err(AppError::InvalidResetToken);
        }

        Ok(messages::RESET_SUCCESS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::auth::Role,
        test_support::{client_payload, principal, TestHarness},
    };
    use uuid::Uuid;

    #[test]
    fn tokens_are_64_hex_chars_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unknown_cpf_gets_same_answer_and_no_token() {
        let h = TestHarness::new();
        let message = h
            .state
            .password_reset_service
            .request_for_client("00000000000")
            .await
            .unwrap();
        assert_eq!(message, messages::RESET_EMAIL_SENT);
        assert_eq!(h.tokens.count(), 0);
        assert!(h.emails.sent().is_empty());
    }

    #[tokio::test]
    async fn known_cpf_gets_token_and_email() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        h.state
            .client_service
            .create(&staff, client_payload("carla@email.com", "55555555555"))
            .await
            .unwrap();

        let message = h
            .state
            .password_reset_service
            .request_for_client("55555555555")
            .await
            .unwrap();
        assert_eq!(message, messages::RESET_EMAIL_SENT);

        let tokens = h.tokens.tokens_for("carla@email.com");
        assert_eq!(tokens.len(), 1);
        let sent = h.emails.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].reset_link().ends_with(&format!("token={}", tokens[0])));
    }

    #[tokio::test]
    async fn token_succeeds_exactly_once() {
        let h = TestHarness::new();
        let staff = principal(Role::Admin, Uuid::new_v4());
        h.state
            .client_service
            .create(&staff, client_payload("davi@email.com", "66666666666"))
            .await
            .unwrap();
        h.state
            .password_reset_service
            .request_for_client("66666666666")
            .await
            .unwrap();
        let token = h.tokens.tokens_for("davi@email.com").remove(0);

        let ok = h
            .state
            .password_reset_service
            .reset_password(&token, "novaSenha123")
            .await
            .unwrap();
        assert_eq!(ok, messages::RESET_SUCCESS);

        let again = h
            .state
            .password_reset_service
            .reset_password(&token, "outraSenha123")
            .await
            .unwrap_err();
        assert!(matches!(again, AppError::ResetTokenAlreadyUsed));

        // A senha nova vale para o login
        h.state
            .auth_service
            .login("davi@email.com", "novaSenha123")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_and_unknown_tokens_are_rejected() {
        let h = TestHarness::new();
        let admin = principal(Role::Admin, Uuid::new_v4());
        h.state
            .user_service
            .create(&admin, crate::test_support::user_payload("eva@lexhub.com", None))
            .await
            .unwrap();
        h.state
            .password_reset_service
            .request_for_user("eva@lexhub.com")
            .await
            .unwrap();
        let token = h.tokens.tokens_for("eva@lexhub.com").remove(0);
        h.tokens.expire(&token);

        let err = h
            .state
            .password_reset_service
            .reset_password(&token, "novaSenha123")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResetTokenExpired));

        let err = h
            .state
            .password_reset_service
            .reset_password("nao-existe", "novaSenha123")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidResetToken));
    }

    #[tokio::test]
    async fn email_failure_keeps_generic_answer() {
        let h = TestHarness::new();
        let admin = principal(Role::Admin, Uuid::new_v4());
        h.state
            .user_service
            .create(&admin, crate::test_support::user_payload("fabio@lexhub.com", None))
            .await
            .unwrap();
        h.emails.fail_next();

        let message = h
            .state
            .password_reset_service
            .request_for_user("fabio@lexhub.com")
            .await
            .unwrap();
        assert_eq!(message, messages::RESET_EMAIL_SENT);
        assert_eq!(h.tokens.count(), 1);
    }
}
