// src/services/viacep.rs

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    common::{error::AppError, messages},
    models::endereco::CepLookup,
};

/// Consulta de endereço a partir do CEP.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError>;
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    // CEP inexistente volta 200 com `"erro": true` (ou "true")
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn into_lookup(self) -> Option<CepLookup> {
        if self.erro.is_some() {
            return None;
        }
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Some(CepLookup {
            endereco: non_empty(self.logradouro),
            bairro: non_empty(self.bairro),
            cidade: non_empty(self.localidade),
            estado: non_empty(self.uf),
        })
    }
}

#[derive(Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: "https://viacep.com.br/ws".to_string(),
        }
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError> {
        let url = format!("{}/{}/json/", self.base_url, cep);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao consultar o ViaCEP: {}", e))?;

        // ViaCEP responde 400 para CEP mal formatado
        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(AppError::NotFound(messages::NOT_FOUND_CEP.into()));
        }

        let body: ViaCepResponse = response
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("ViaCEP respondeu com erro: {}", e))?
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Resposta inválida do ViaCEP: {}", e))?;

        body.into_lookup()
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_CEP.into()))
    }
}
