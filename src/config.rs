// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AgendamentoRepository, AgendamentoStore, BoletoRepository, BoletoStore, ClientRepository,
        ClientStore, DocumentRepository, DocumentStore, DocumentoProcessoRepository,
        DocumentoProcessoStore, EnderecoRepository, EnderecoStore, PasswordResetRepository,
        PasswordResetStore, ProcessoRepository, ProcessoStore, UserRepository, UserStore,
    },
    services::{
        agendamento_service::AgendamentoService,
        auth::AuthService,
        boleto_service::BoletoService,
        cache::{NoopCache, RedisCache, ResponseCache},
        client_service::ClientService,
        document_service::DocumentService,
        documento_processo_service::DocumentoProcessoService,
        email::{EmailSender, SmtpEmailSender, SmtpSettings},
        endereco_service::EnderecoService,
        hashing::PasswordHasher,
        password_reset_service::{PasswordResetService, ResetEmailSettings},
        processo_service::ProcessoService,
        storage::{ObjectStorage, R2Settings, R2Storage},
        user_service::UserService,
        validators::EntityValidator,
        viacep::{AddressLookup, ViaCepClient},
    },
};

const DEFAULT_EMAIL_FROM: &str = "\"Sistema de Gestão\" <noreply@seuapp.com>";

/// Tudo que vem do ambiente (`.env` em desenvolvimento).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    pub r2: R2Settings,
    pub redis_url: Option<String>,
    pub cache_ttl_seconds: u64,
    pub smtp: SmtpSettings,
    pub email_from: String,
    pub frontend_url: String,
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{} deve ser definida", name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválida ('{}'): {}", name, raw, e)),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let r2_bucket = optional("R2_BUCKET_NAME").unwrap_or_else(|| "lexhub".to_string());
        let r2 = R2Settings {
            endpoint: required("R2_ENDPOINT")?,
            access_key_id: required("R2_ACCESS_KEY_ID")?,
            secret_access_key: required("R2_SECRET_ACCESS_KEY")?,
            public_url: optional("R2_PUBLIC_URL").unwrap_or_else(|| format!("https://{}.r2.dev", r2_bucket)),
            bucket: r2_bucket,
        };

        let smtp = SmtpSettings {
            host: optional("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parsed_or("SMTP_PORT", 587)?,
            username: optional("SMTP_USERNAME").unwrap_or_default(),
            password: optional("SMTP_PASSWORD").unwrap_or_default(),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed_or("PORT", 3000)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_hours: parsed_or("JWT_EXPIRATION_HOURS", 24)?,
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cookie_secure: parsed_or("COOKIE_SECURE", false)?,
            r2,
            redis_url: optional("REDIS_URL"),
            cache_ttl_seconds: parsed_or("CACHE_TTL_SECONDS", 600)?,
            smtp,
            email_from: optional("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            frontend_url: optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3001".to_string()),
        })
    }
}

/// Um repositório por entidade.
#[derive(Clone)]
pub struct Stores {
    pub clients: Arc<dyn ClientStore>,
    pub users: Arc<dyn UserStore>,
    pub processos: Arc<dyn ProcessoStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub documentos_processo: Arc<dyn DocumentoProcessoStore>,
    pub boletos: Arc<dyn BoletoStore>,
    pub agendamentos: Arc<dyn AgendamentoStore>,
    pub enderecos: Arc<dyn EnderecoStore>,
    pub password_resets: Arc<dyn PasswordResetStore>,
}

impl Stores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            clients: Arc::new(ClientRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            processos: Arc::new(ProcessoRepository::new(pool.clone())),
            documents: Arc::new(DocumentRepository::new(pool.clone())),
            documentos_processo: Arc::new(DocumentoProcessoRepository::new(pool.clone())),
            boletos: Arc::new(BoletoRepository::new(pool.clone())),
            agendamentos: Arc::new(AgendamentoRepository::new(pool.clone())),
            enderecos: Arc::new(EnderecoRepository::new(pool.clone())),
            password_resets: Arc::new(PasswordResetRepository::new(pool.clone())),
        }
    }
}

/// Serviços externos: R2, SMTP, ViaCEP e Redis.
#[derive(Clone)]
pub struct Integrations {
    pub storage: Arc<dyn ObjectStorage>,
    pub email: Arc<dyn EmailSender>,
    pub address_lookup: Arc<dyn AddressLookup>,
    pub cache: Arc<dyn ResponseCache>,
}

impl Integrations {
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = Arc::new(R2Storage::new(config.r2.clone()));
        let email = Arc::new(SmtpEmailSender::new(config.smtp.clone())?);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        let address_lookup = Arc::new(ViaCepClient::new(http));

        // Sem Redis a API funciona igual, só sem cache
        let cache: Arc<dyn ResponseCache> = match config.redis_url.as_deref() {
            Some(url) => match RedisCache::connect(url).await {
                Ok(cache) => {
                    tracing::info!("✅ Cache Redis conectado");
                    Arc::new(cache)
                }
                Err(e) => {
                    tracing::warn!("⚠️ Redis indisponível, seguindo sem cache: {}", e);
                    Arc::new(NoopCache)
                }
            },
            None => Arc::new(NoopCache),
        };

        Ok(Self {
            storage,
            email,
            address_lookup,
            cache,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cookie_secure: bool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub user_service: UserService,
    pub processo_service: ProcessoService,
    pub document_service: DocumentService,
    pub documento_processo_service: DocumentoProcessoService,
    pub boleto_service: BoletoService,
    pub agendamento_service: AgendamentoService,
    pub endereco_service: EnderecoService,
    pub password_reset_service: PasswordResetService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<(Self, PgPool)> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let stores = Stores::postgres(&db_pool);
        let integrations = Integrations::from_config(config).await?;

        Ok((Self::assemble(config, stores, integrations), db_pool))
    }

    /// Monta o grafo de dependências a partir de repositórios e integrações já prontos.
    pub fn assemble(config: &AppConfig, stores: Stores, integrations: Integrations) -> Self {
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let validator = EntityValidator::new(
            stores.clients.clone(),
            stores.users.clone(),
            stores.processos.clone(),
            stores.agendamentos.clone(),
            stores.enderecos.clone(),
        );

        Self {
            cookie_secure: config.cookie_secure,
            auth_service: AuthService::new(
                stores.users.clone(),
                stores.clients.clone(),
                hasher.clone(),
                config.jwt_secret.clone(),
                config.jwt_expiration_hours,
            ),
            client_service: ClientService::new(
                stores.clients.clone(),
                validator.clone(),
                hasher.clone(),
                integrations.storage.clone(),
            ),
            user_service: UserService::new(
                stores.users.clone(),
                validator.clone(),
                hasher.clone(),
                integrations.storage.clone(),
            ),
            processo_service: ProcessoService::new(
                stores.processos.clone(),
                validator.clone(),
                integrations.cache.clone(),
                config.cache_ttl_seconds,
            ),
            document_service: DocumentService::new(
                stores.documents.clone(),
                validator.clone(),
                integrations.storage.clone(),
            ),
            documento_processo_service: DocumentoProcessoService::new(
                stores.documentos_processo.clone(),
                validator.clone(),
                integrations.storage.clone(),
            ),
            boleto_service: BoletoService::new(
                stores.boletos.clone(),
                validator.clone(),
                integrations.storage.clone(),
            ),
            agendamento_service: AgendamentoService::new(stores.agendamentos.clone(), validator.clone()),
            endereco_service: EnderecoService::new(
                stores.enderecos.clone(),
                validator,
                integrations.address_lookup.clone(),
            ),
            password_reset_service: PasswordResetService::new(
                stores.password_resets.clone(),
                stores.users.clone(),
                stores.clients.clone(),
                hasher,
                integrations.email.clone(),
                ResetEmailSettings {
                    from: config.email_from.clone(),
                    frontend_url: config.frontend_url.clone(),
                },
            ),
        }
    }
}
