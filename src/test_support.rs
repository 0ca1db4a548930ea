// src/test_support.rs
// Estado da aplicação montado só com stores em memória e integrações falsas.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, upload::UploadedFile},
    config::{AppConfig, AppState, Integrations, Stores},
    db::{
        memory::{
            MemoryAgendamentoStore, MemoryBoletoStore, MemoryClientStore, MemoryDocumentStore,
            MemoryDocumentoProcessoStore, MemoryEnderecoStore, MemoryPasswordResetStore,
            MemoryProcessoStore, MemoryUserStore,
        },
        ClientStore, UserStore,
    },
    models::{
        agendamento::CreateAgendamentoPayload,
        auth::{Principal, Role},
        client::{CreateClientPayload, NewClient},
        endereco::CepLookup,
        processo::{CreateProcessoPayload, TipoProcesso},
        user::{CreateUserPayload, NewUser},
    },
    services::{
        cache::ResponseCache,
        email::{EmailSender, PasswordResetEmail, SmtpSettings},
        storage::{key_from_public_url, object_key, ObjectStorage, R2Settings, StoredObject},
        viacep::AddressLookup,
    },
};

pub const PUBLIC_URL: &str = "https://arquivos.lexhub.test";
pub const UNKNOWN_CEP: &str = "00000000";

// --- INTEGRAÇÕES FALSAS ---

#[derive(Default)]
pub struct FakeStorage {
    uploaded: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn was_deleted(&self, key: &str) -> bool {
        self.deleted.lock().unwrap().iter().any(|k| k == key)
    }

    pub fn upload_count(&self) -> usize {
        self.uploaded.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, file: &UploadedFile, folder: &str) -> Result<StoredObject, AppError> {
        let key = object_key(folder, file);
        self.uploaded.lock().unwrap().push(key.clone());
        Ok(StoredObject {
            url: format!("{}/{}", PUBLIC_URL, key),
            key,
            bucket: "lexhub".into(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn extract_key_from_url(&self, url: &str) -> Option<String> {
        key_from_public_url(PUBLIC_URL, url)
    }
}

#[derive(Default)]
pub struct FakeEmailSender {
    sent: Mutex<Vec<PasswordResetEmail>>,
    fail_next: AtomicBool,
}

impl FakeEmailSender {
    pub fn sent(&self) -> Vec<PasswordResetEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmailSender for FakeEmailSender {
    async fn send_password_reset_email(&self, email: &PasswordResetEmail) -> Result<(), AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow::anyhow!("SMTP fora do ar").into());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Todo CEP existe e fica em Porto Alegre, exceto `UNKNOWN_CEP`.
pub struct FakeAddressLookup;

#[async_trait]
impl AddressLookup for FakeAddressLookup {
    async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError> {
        if cep == UNKNOWN_CEP {
            return Err(AppError::NotFound(messages::NOT_FOUND_CEP.into()));
        }
        Ok(CepLookup {
            endereco: Some("Rua dos Andradas".into()),
            bairro: Some("Centro Histórico".into()),
            cidade: Some("Porto Alegre".into()),
            estado: Some("RS".into()),
        })
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    async fn delete_pattern(&self, pattern: &str) {
        let prefix = pattern.trim_end_matches('*');
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(prefix));
    }
}

// --- ESTADO ---

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/lexhub_test".into(),
        port: 0,
        jwt_secret: "segredo-de-teste".into(),
        jwt_expiration_hours: 1,
        bcrypt_cost: 4,
        cookie_secure: false,
        r2: R2Settings {
            endpoint: "http://localhost:9000".into(),
            access_key_id: "test".into(),
            secret_access_key: "test".into(),
            bucket: "lexhub".into(),
            public_url: PUBLIC_URL.into(),
        },
        redis_url: None,
        cache_ttl_seconds: 60,
        smtp: SmtpSettings {
            host: "localhost".into(),
            port: 2525,
            username: String::new(),
            password: String::new(),
        },
        email_from: "\"Sistema de Gestão\" <noreply@seuapp.com>".into(),
        frontend_url: "http://localhost:3001".into(),
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub clients: Arc<MemoryClientStore>,
    pub users: Arc<MemoryUserStore>,
    pub tokens: Arc<MemoryPasswordResetStore>,
    pub storage: Arc<FakeStorage>,
    pub emails: Arc<FakeEmailSender>,
    pub cache: Arc<MemoryCache>,
}

impl TestHarness {
    pub fn new() -> Self {
        let clients = Arc::new(MemoryClientStore::default());
        let users = Arc::new(MemoryUserStore::default());
        let tokens = Arc::new(MemoryPasswordResetStore::default());
        let storage = Arc::new(FakeStorage::default());
        let emails = Arc::new(FakeEmailSender::default());
        let cache = Arc::new(MemoryCache::default());

        let stores = Stores {
            clients: clients.clone(),
            users: users.clone(),
            processos: Arc::new(MemoryProcessoStore::default()),
            documents: Arc::new(MemoryDocumentStore::default()),
            documentos_processo: Arc::new(MemoryDocumentoProcessoStore::default()),
            boletos: Arc::new(MemoryBoletoStore::default()),
            agendamentos: Arc::new(MemoryAgendamentoStore::default()),
            enderecos: Arc::new(MemoryEnderecoStore::default()),
            password_resets: tokens.clone(),
        };
        let integrations = Integrations {
            storage: storage.clone(),
            email: emails.clone(),
            address_lookup: Arc::new(FakeAddressLookup),
            cache: cache.clone(),
        };

        Self {
            state: AppState::assemble(&test_config(), stores, integrations),
            clients,
            users,
            tokens,
            storage,
            emails,
            cache,
        }
    }

    /// Cria direto no store um cliente e um advogado (COLLABORATOR). Devolve `(client_id, user_id)`.
    pub async fn seed_client_and_lawyer(&self) -> (Uuid, Uuid) {
        let suffix = Uuid::new_v4().simple().to_string();
        let cpf: String = format!("{:011}", Uuid::new_v4().as_u128() % 100_000_000_000);

        let client = self
            .clients
            .create(NewClient {
                name: "Cliente Semente".into(),
                email: format!("cliente-{}@email.com", suffix),
                password_hash: "hash".into(),
                avatar: None,
                cpf,
                phone: "51999990000".into(),
                birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
                sex: "F".into(),
                role: Role::Client,
                status: true,
            })
            .await
            .unwrap();

        let lawyer = self
            .users
            .create(NewUser {
                name: "Advogado Semente".into(),
                email: format!("advogado-{}@lexhub.com", suffix),
                password_hash: "hash".into(),
                avatar: None,
                role: Role::Collaborator,
                status: true,
            })
            .await
            .unwrap();

        (client.id, lawyer.id)
    }

    /// Valor do header `Authorization` para um principal qualquer.
    pub fn bearer(&self, role: Role, subject_id: Uuid) -> String {
        let token = self
            .state
            .auth_service
            .create_token(subject_id, "teste@lexhub.com", role)
            .unwrap();
        format!("Bearer {}", token)
    }
}

// --- FÁBRICAS ---

pub fn principal(role: Role, subject_id: Uuid) -> Principal {
    Principal {
        subject_id,
        role,
        email: "teste@lexhub.com".into(),
    }
}

pub fn client_payload(email: &str, cpf: &str) -> CreateClientPayload {
    CreateClientPayload {
        name: "Cliente Teste".into(),
        email: email.into(),
        avatar: None,
        password: "senha123".into(),
        cpf: cpf.into(),
        phone: "51988880000".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
        sex: "F".into(),
        role: None,
        status: None,
    }
}

pub fn user_payload(email: &str, role: Option<Role>) -> CreateUserPayload {
    CreateUserPayload {
        name: "Usuário Teste".into(),
        email: email.into(),
        password: "senha123".into(),
        avatar: None,
        role,
        status: None,
    }
}

pub fn processo_payload(numero_processo: i64, client_id: Uuid, responsavel_id: Uuid) -> CreateProcessoPayload {
    CreateProcessoPayload {
        numero_processo,
        tipo: TipoProcesso::Civel,
        tribunal: Some("TJRS".into()),
        status: None,
        data_abertura: None,
        data_encerramento: None,
        client_id,
        responsavel_id,
        parte_contraria: "Empresa X Ltda.".into(),
    }
}

pub fn agendamento_payload(client_id: Uuid, data_hora: DateTime<Utc>) -> CreateAgendamentoPayload {
    CreateAgendamentoPayload {
        client_id,
        titulo: "Reunião".into(),
        descricao: None,
        data_hora,
        local: Some("Escritório".into()),
        link: None,
    }
}

pub fn png_file() -> UploadedFile {
    UploadedFile {
        file_name: "foto.png".into(),
        content_type: "image/png".into(),
        bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
    }
}

pub fn pdf_file() -> UploadedFile {
    UploadedFile {
        file_name: "contrato.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: Bytes::from_static(b"%PDF-1.4"),
    }
}
