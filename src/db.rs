pub mod agendamento_repo;
pub use agendamento_repo::{AgendamentoRepository, AgendamentoStore};
pub mod boleto_repo;
pub use boleto_repo::{BoletoRepository, BoletoStore};
pub mod client_repo;
pub use client_repo::{ClientRepository, ClientStore};
pub mod document_repo;
pub use document_repo::{DocumentRepository, DocumentStore};
pub mod documento_processo_repo;
pub use documento_processo_repo::{DocumentoProcessoRepository, DocumentoProcessoStore};
pub mod endereco_repo;
pub use endereco_repo::{EnderecoRepository, EnderecoStore};
pub mod password_reset_repo;
pub use password_reset_repo::{PasswordResetRepository, PasswordResetStore};
pub mod processo_repo;
pub use processo_repo::{ProcessoRepository, ProcessoStore};
pub mod user_repo;
pub use user_repo::{UserRepository, UserStore};

#[cfg(test)]
pub mod memory;
