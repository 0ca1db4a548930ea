// src/services/email.rs

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::common::error::AppError;

/// Tudo que o e-mail de redefinição precisa saber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetEmail {
    pub to: String,
    pub name: String,
    pub token: String,
    pub from: String,
    pub frontend_url: String,
}

impl PasswordResetEmail {
    pub fn reset_link(&self) -> String {
        format!(
            "{}/reset-password?token={}",
            self.frontend_url.trim_end_matches('/'),
            self.token
        )
    }

    fn html_body(&self) -> String {
        let link = self.reset_link();
        format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Redefinição de senha</h2>
  <p>Olá, {name}!</p>
  <p>Recebemos uma solicitação para redefinir a sua senha. Clique no botão abaixo para criar uma nova senha:</p>
  <p><a href="{link}" style="background-color: #1f2937; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 4px;">Redefinir senha</a></p>
  <p>Ou copie e cole este link no navegador:</p>
  <p>{link}</p>
  <p>Este link expira em 1 hora. Se você não fez esta solicitação, ignore este e-mail.</p>
</div>"#,
            name = self.name,
            link = link,
        )
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_password_reset_email(&self, email: &PasswordResetEmail) -> Result<(), AppError>;
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    pub fn new(settings: SmtpSettings) -> anyhow::Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .build();
        Ok(Self { mailer })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_password_reset_email(&self, email: &PasswordResetEmail) -> Result<(), AppError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| anyhow::anyhow!("Remetente inválido '{}': {}", email.from, e))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| anyhow::anyhow!("Destinatário inválido: {}", e))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject("Redefinição de senha")
            .header(ContentType::TEXT_HTML)
            .body(email.html_body())
            .map_err(|e| anyhow::anyhow!("Falha ao montar o e-mail: {}", e))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| anyhow::anyhow!("Falha no envio SMTP: {}", e))?;

        tracing::info!("📧 E-mail de redefinição enviado");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_points_to_frontend_reset_page() {
        let email = PasswordResetEmail {
            to: "ana@email.com".into(),
            name: "Ana".into(),
            token: "abc123".into(),
            from: "\"Sistema de Gestão\" <noreply@seuapp.com>".into(),
            frontend_url: "http://localhost:3001/".into(),
        };
        assert_eq!(email.reset_link(), "http://localhost:3001/reset-password?token=abc123");
        assert!(email.html_body().contains("Olá, Ana!"));
    }
}
