// src/common/upload.rs

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use crate::common::{error::AppError, messages};

/// Tamanho máximo de arquivo aceito (5 MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const MIME_JPEG: &str = "image/jpeg";
const MIME_JPG: &str = "image/jpg";
const MIME_PNG: &str = "image/png";
const MIME_WEBP: &str = "image/webp";
const MIME_PDF: &str = "application/pdf";
const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const IMAGE_MIME_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_WEBP, MIME_JPG];
pub const BOLETO_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_JPEG, MIME_JPG, MIME_PNG];
pub const DOCUMENTO_PROCESSO_MIME_TYPES: &[&str] =
    &[MIME_PDF, MIME_JPEG, MIME_JPG, MIME_PNG, MIME_DOC, MIME_DOCX];
pub const DOCUMENT_MIME_TYPES: &[&str] =
    &[MIME_JPEG, MIME_PNG, MIME_WEBP, MIME_JPG, MIME_PDF, MIME_DOC, MIME_DOCX];

/// Arquivo recebido em `multipart/form-data`, já em memória.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Extensão do nome original (sem o ponto), se houver.
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// Formulário multipart: no máximo um campo `file` + campos de texto.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "file" {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                // Parte vazia (input de arquivo sem seleção) conta como "sem arquivo"
                if !bytes.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Campo de texto opcional; string em branco vira `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("{} should not be empty", name)))
    }

    /// Retira o arquivo do formulário validando presença, tipo e tamanho.
    pub fn take_file(&mut self, allowed: &[&str]) -> Result<UploadedFile, AppError> {
        validate_file(self.file.take(), allowed)
    }
}

// Permite usar `MultipartForm` direto como extrator (sempre o último argumento)
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::read(multipart).await
    }
}

/// Presença, tipo MIME permitido e limite de tamanho, nesta ordem.
pub fn validate_file(file: Option<UploadedFile>, allowed: &[&str]) -> Result<UploadedFile, AppError> {
    let file = file.ok_or_else(|| AppError::BadRequest(messages::NO_FILE.to_string()))?;

    if !allowed.contains(&file.content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Invalid file type. Allowed: {}",
            allowed.join(", ")
        )));
    }

    if file.size() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(messages::FILE_TOO_LARGE.to_string()));
    }

    Ok(file)
}
