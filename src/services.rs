// Regras de negócio
pub mod agendamento_service;
pub mod authorization;
pub mod boleto_service;
pub mod client_service;
pub mod document_service;
pub mod documento_processo_service;
pub mod endereco_service;
pub mod password_reset_service;
pub mod processo_service;
pub mod scheduling;
pub mod user_service;
pub mod validators;

// Autenticação
pub mod auth;
pub mod hashing;

// Integrações externas
pub mod cache;
pub mod email;
pub mod storage;
pub mod viacep;
