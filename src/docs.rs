// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::logout,

        // --- Password Reset ---
        handlers::password_reset::request_client_reset,
        handlers::password_reset::request_user_reset,
        handlers::password_reset::reset_password,

        // --- Clients ---
        handlers::client::list_clients,
        handlers::client::get_client,
        handlers::client::create_client,
        handlers::client::update_client,
        handlers::client::upload_client_avatar,
        handlers::client::delete_client,

        // --- Users ---
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::create_user,
        handlers::user::update_user,
        handlers::user::upload_user_avatar,
        handlers::user::delete_user,

        // --- Processos ---
        handlers::processo::list_processos,
        handlers::processo::get_processo,
        handlers::processo::create_processo,
        handlers::processo::update_processo,
        handlers::processo::delete_processo,

        // --- Documents ---
        handlers::document::list_documents,
        handlers::document::list_client_documents,
        handlers::document::get_document,
        handlers::document::upload_document,
        handlers::document::update_document,
        handlers::document::delete_document,

        // --- Documentos do Processo ---
        handlers::documento_processo::list_documentos,
        handlers::documento_processo::list_processo_documentos,
        handlers::documento_processo::get_documento,
        handlers::documento_processo::upload_documento,
        handlers::documento_processo::update_documento,
        handlers::documento_processo::delete_documento,

        // --- Boletos ---
        handlers::boleto::list_boletos,
        handlers::boleto::list_client_boletos,
        handlers::boleto::get_boleto,
        handlers::boleto::upload_boleto,
        handlers::boleto::update_boleto,
        handlers::boleto::delete_boleto,

        // --- Agendamentos ---
        handlers::agendamento::list_agendamentos,
        handlers::agendamento::list_client_agendamentos,
        handlers::agendamento::get_agendamento,
        handlers::agendamento::create_agendamento,
        handlers::agendamento::update_agendamento,
        handlers::agendamento::delete_agendamento,

        // --- Endereços ---
        handlers::endereco::list_enderecos,
        handlers::endereco::get_endereco,
        handlers::endereco::create_endereco,
        handlers::endereco::update_endereco,
        handlers::endereco::delete_endereco,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::Profile,

            // --- Password Reset ---
            models::password_reset::RequestResetClientPayload,
            models::password_reset::RequestResetUserPayload,
            models::password_reset::ResetPasswordPayload,
            models::password_reset::MessageResponse,

            // --- Clients ---
            models::client::ClientSummary,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,

            // --- Users ---
            models::user::UserSummary,
            models::user::CreateUserPayload,
            models::user::UpdateUserPayload,

            // --- Processos ---
            models::processo::TipoProcesso,
            models::processo::ProcessoStatus,
            models::processo::Processo,
            models::processo::CreateProcessoPayload,
            models::processo::UpdateProcessoPayload,

            // --- Arquivos ---
            models::document::Document,
            models::document::UpdateDocumentPayload,
            models::documento_processo::DocumentoProcesso,
            models::documento_processo::UpdateDocumentoProcessoPayload,
            models::boleto::Boleto,
            models::boleto::UpdateBoletoPayload,

            // --- Agendamentos ---
            models::agendamento::Agendamento,
            models::agendamento::CreateAgendamentoPayload,
            models::agendamento::UpdateAgendamentoPayload,

            // --- Endereços ---
            models::endereco::Endereco,
            models::endereco::CreateEnderecoPayload,
            models::endereco::UpdateEnderecoPayload,

            // --- Formulários multipart ---
            handlers::client::AvatarUploadForm,
            handlers::document::DocumentUploadForm,
            handlers::documento_processo::DocumentoProcessoUploadForm,
            handlers::boleto::BoletoUploadForm,
        )
    ),
    tags(
        (name = "Auth", description = "Login, sessão e perfil"),
        (name = "Password Reset", description = "Redefinição de senha por e-mail"),
        (name = "Clients", description = "Clientes do escritório"),
        (name = "Users", description = "Equipe (advogados e administradores)"),
        (name = "Processos", description = "Processos judiciais"),
        (name = "Documents", description = "Documentos pessoais dos clientes"),
        (name = "Documentos do Processo", description = "Peças e anexos dos processos"),
        (name = "Boletos", description = "Cobranças dos clientes"),
        (name = "Agendamentos", description = "Agenda de reuniões"),
        (name = "Endereços", description = "Endereço do cliente (preenchido pelo CEP)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_resource_and_the_jwt_scheme() {
        let doc = ApiDoc::openapi();
        for path in ["/auth", "/client/{id}", "/processo", "/boleto/{id}", "/password-reset/reset"] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
