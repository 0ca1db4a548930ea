// src/services/storage.rs

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
};
use uuid::Uuid;

use crate::common::{error::AppError, upload::UploadedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
    pub bucket: String,
}

/// Armazenamento de arquivos (avatares, boletos, documentos).
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, file: &UploadedFile, folder: &str) -> Result<StoredObject, AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
    /// Recupera a chave a partir da URL pública. `None` se a URL não é deste bucket.
    fn extract_key_from_url(&self, url: &str) -> Option<String>;
}

/// Chave `{pasta}/{uuid}.{ext}`; a extensão vem do nome original.
pub fn object_key(folder: &str, file: &UploadedFile) -> String {
    match file.extension() {
        Some(ext) => format!("{}/{}.{}", folder, Uuid::new_v4(), ext.to_lowercase()),
        None => format!("{}/{}", folder, Uuid::new_v4()),
    }
}

pub fn key_from_public_url(public_url: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/", public_url.trim_end_matches('/'));
    url.strip_prefix(&prefix)
        .filter(|key| !key.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Clone)]
pub struct R2Settings {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub public_url: String,
}

// Cloudflare R2 fala o protocolo do S3
#[derive(Clone)]
pub struct R2Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl R2Storage {
    pub fn new(settings: R2Settings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id,
            settings.secret_access_key,
            None,
            None,
            "r2",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("auto"))
            .endpoint_url(settings.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket: settings.bucket,
            public_url: settings.public_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl ObjectStorage for R2Storage {
    async fn upload(&self, file: &UploadedFile, folder: &str) -> Result<StoredObject, AppError> {
        let key = object_key(folder, file);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file.bytes.to_vec()))
            .content_type(&file.content_type)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Falha no upload para o R2 ({}): {}", key, e))?;

        tracing::info!("📦 Arquivo enviado ao storage: {} ({} bytes)", key, file.size());

        Ok(StoredObject {
            url: format!("{}/{}", self.public_url, key),
            key,
            bucket: self.bucket.clone(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao remover {} do R2: {}", key, e))?;

        tracing::info!("🗑️ Arquivo removido do storage: {}", key);
        Ok(())
    }

    fn extract_key_from_url(&self, url: &str) -> Option<String> {
        key_from_public_url(&self.public_url, url)
    }
}
