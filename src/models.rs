pub mod agendamento;
pub mod auth;
pub mod boleto;
pub mod client;
pub mod document;
pub mod documento_processo;
pub mod endereco;
pub mod password_reset;
pub mod processo;
pub mod user;
