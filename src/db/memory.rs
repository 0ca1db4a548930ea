// src/db/memory.rs
// Implementações em memória dos stores, usadas pelos testes de serviço e de rotas.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination},
    db::{
        AgendamentoStore, BoletoStore, ClientStore, DocumentStore, DocumentoProcessoStore,
        EnderecoStore, PasswordResetStore, ProcessoStore, UserStore,
    },
    models::{
        agendamento::{Agendamento, CreateAgendamentoPayload, UpdateAgendamentoPayload},
        boleto::{Boleto, NewBoleto, UpdateBoletoPayload},
        client::{Client, ClientChanges, NewClient},
        document::{Document, NewDocument, UpdateDocumentPayload},
        documento_processo::{
            DocumentoProcesso, NewDocumentoProcesso, UpdateDocumentoProcessoPayload,
        },
        endereco::{Endereco, EnderecoChanges, NewEndereco},
        password_reset::PasswordResetToken,
        processo::{CreateProcessoPayload, Processo, UpdateProcessoPayload},
        user::{NewUser, User, UserChanges},
    },
};

fn page_of<T: Clone>(rows: impl Iterator<Item = T>, page: Pagination) -> Vec<T> {
    rows.skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

fn remove_by<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !pred(r));
    rows.len() != before
}

// --- CLIENTES ---

#[derive(Default)]
pub struct MemoryClientStore {
    rows: Mutex<Vec<Client>>,
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn list(&self, page: Pagination, search: Option<&str>) -> Result<Vec<Client>, AppError> {
        let rows = self.rows.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        let matches = rows.iter().filter(|c| match &needle {
            None => true,
            Some(n) => [&c.name, &c.email, &c.cpf, &c.phone]
                .iter()
                .any(|f| f.to_lowercase().contains(n.as_str())),
        });
        Ok(page_of(matches.cloned(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.email == email).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.cpf == cpf).cloned())
    }

    async fn create(&self, new: NewClient) -> Result<Client, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.email == new.email || c.cpf == new.cpf) {
            return Err(AppError::Conflict(messages::CLIENT_EXISTS.into()));
        }
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password: new.password_hash,
            avatar: new.avatar,
            cpf: new.cpf,
            phone: new.phone,
            birth_date: new.birth_date,
            sex: new.sex,
            role: new.role,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        rows.push(client.clone());
        Ok(client)
    }

    async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<Option<Client>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(c) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = changes.name { c.name = v; }
        if let Some(v) = changes.email { c.email = v; }
        if let Some(v) = changes.password_hash { c.password = v; }
        if let Some(v) = changes.cpf { c.cpf = v; }
        if let Some(v) = changes.phone { c.phone = v; }
        if let Some(v) = changes.birth_date { c.birth_date = v; }
        if let Some(v) = changes.sex { c.sex = v; }
        if let Some(v) = changes.role { c.role = v; }
        if let Some(v) = changes.status { c.status = v; }
        c.updated_at = Utc::now();
        Ok(Some(c.clone()))
    }

    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<Option<Client>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|c| c.id == id).map(|c| {
            c.avatar = Some(avatar_url.to_string());
            c.clone()
        }))
    }

    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|c| c.email == email)
            .map(|c| c.password = password_hash.to_string())
            .is_some())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |c| c.id == id))
    }
}

// --- USUÁRIOS ---

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self, page: Pagination) -> Result<Vec<User>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict(messages::USER_EXISTS.into()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password: new.password_hash,
            avatar: new.avatar,
            role: new.role,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(u) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = changes.name { u.name = v; }
        if let Some(v) = changes.email { u.email = v; }
        if let Some(v) = changes.password_hash { u.password = v; }
        if let Some(v) = changes.role { u.role = v; }
        if let Some(v) = changes.status { u.status = v; }
        u.updated_at = Utc::now();
        Ok(Some(u.clone()))
    }

    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<Option<User>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|u| u.id == id).map(|u| {
            u.avatar = Some(avatar_url.to_string());
            u.clone()
        }))
    }

    async fn update_password_by_email(&self, email: &str, password_hash: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|u| u.email == email)
            .map(|u| u.password = password_hash.to_string())
            .is_some())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |u| u.id == id))
    }
}

// --- PROCESSOS ---

#[derive(Default)]
pub struct MemoryProcessoStore {
    rows: Mutex<Vec<Processo>>,
}

#[async_trait]
impl ProcessoStore for MemoryProcessoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Processo>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Processo>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_numero(&self, numero_processo: i64) -> Result<Option<Processo>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.numero_processo == numero_processo)
            .cloned())
    }

    async fn create(&self, payload: &CreateProcessoPayload) -> Result<Processo, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.numero_processo == payload.numero_processo) {
            return Err(AppError::Conflict(messages::PROCESSO_NUMBER_EXISTS.into()));
        }
        let now = Utc::now();
        let processo = Processo {
            id: Uuid::new_v4(),
            numero_processo: payload.numero_processo,
            tipo: payload.tipo,
            status: payload.status.unwrap_or_default(),
            tribunal: payload.tribunal.clone(),
            data_abertura: payload.data_abertura.unwrap_or(now),
            data_encerramento: payload.data_encerramento,
            client_id: payload.client_id,
            responsavel_id: payload.responsavel_id,
            parte_contraria: payload.parte_contraria.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(processo.clone());
        Ok(processo)
    }

    async fn update(&self, id: Uuid, payload: &UpdateProcessoPayload) -> Result<Option<Processo>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(numero) = payload.numero_processo {
            if rows.iter().any(|p| p.numero_processo == numero && p.id != id) {
                return Err(AppError::Conflict(messages::PROCESSO_NUMBER_EXISTS.into()));
            }
        }
        let Some(p) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = payload.numero_processo { p.numero_processo = v; }
        if let Some(v) = payload.tipo { p.tipo = v; }
        if let Some(v) = payload.status { p.status = v; }
        if let Some(v) = &payload.tribunal { p.tribunal = Some(v.clone()); }
        if let Some(v) = payload.data_abertura { p.data_abertura = v; }
        if let Some(v) = payload.data_encerramento { p.data_encerramento = Some(v); }
        if let Some(v) = payload.client_id { p.client_id = v; }
        if let Some(v) = payload.responsavel_id { p.responsavel_id = v; }
        if let Some(v) = &payload.parte_contraria { p.parte_contraria = v.clone(); }
        p.updated_at = Utc::now();
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |p| p.id == id))
    }
}

// --- DOCUMENTOS DO CLIENTE ---

#[derive(Default)]
pub struct MemoryDocumentStore {
    rows: Mutex<Vec<Document>>,
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Document>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Document>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, new: NewDocument) -> Result<Document, AppError> {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            name: new.name,
            file_url: new.file_url,
            file_key: new.file_key,
            file_size: new.file_size,
            mime_type: new.mime_type,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, id: Uuid, payload: &UpdateDocumentPayload) -> Result<Option<Document>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|d| d.id == id).map(|d| {
            if let Some(v) = &payload.name { d.name = v.clone(); }
            d.updated_at = Utc::now();
            d.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |d| d.id == id))
    }
}

// --- DOCUMENTOS DO PROCESSO ---

#[derive(Default)]
pub struct MemoryDocumentoProcessoStore {
    rows: Mutex<Vec<DocumentoProcesso>>,
}

#[async_trait]
impl DocumentoProcessoStore for MemoryDocumentoProcessoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn list_by_processo(&self, processo_id: Uuid, page: Pagination) -> Result<Vec<DocumentoProcesso>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(page_of(
            rows.iter().filter(|d| d.processo_id == processo_id).cloned(),
            page,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DocumentoProcesso>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, new: NewDocumentoProcesso) -> Result<DocumentoProcesso, AppError> {
        let now = Utc::now();
        let doc = DocumentoProcesso {
            id: Uuid::new_v4(),
            processo_id: new.processo_id,
            nome: new.nome,
            descricao: new.descricao,
            tipo: new.tipo,
            file_url: new.file_url,
            file_key: new.file_key,
            file_size: new.file_size,
            mime_type: new.mime_type,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, id: Uuid, payload: &UpdateDocumentoProcessoPayload) -> Result<Option<DocumentoProcesso>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|d| d.id == id).map(|d| {
            if let Some(v) = &payload.nome { d.nome = v.clone(); }
            if let Some(v) = &payload.descricao { d.descricao = Some(v.clone()); }
            if let Some(v) = &payload.tipo { d.tipo = Some(v.clone()); }
            d.updated_at = Utc::now();
            d.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |d| d.id == id))
    }
}

// --- BOLETOS ---

#[derive(Default)]
pub struct MemoryBoletoStore {
    rows: Mutex<Vec<Boleto>>,
}

#[async_trait]
impl BoletoStore for MemoryBoletoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Boleto>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Boleto>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(page_of(rows.iter().filter(|b| b.client_id == client_id).cloned(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Boleto>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, new: NewBoleto) -> Result<Boleto, AppError> {
        let now = Utc::now();
        let boleto = Boleto {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            titulo: new.titulo,
            observacao: new.observacao,
            status: true,
            data_vencimento: new.data_vencimento,
            file_url: new.file_url,
            file_key: new.file_key,
            file_size: new.file_size,
            mime_type: new.mime_type,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(boleto.clone());
        Ok(boleto)
    }

    async fn update(&self, id: Uuid, payload: &UpdateBoletoPayload) -> Result<Option<Boleto>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|b| b.id == id).map(|b| {
            if let Some(v) = &payload.titulo { b.titulo = v.clone(); }
            if let Some(v) = &payload.observacao { b.observacao = Some(v.clone()); }
            if let Some(v) = payload.data_vencimento { b.data_vencimento = v; }
            if let Some(v) = payload.status { b.status = v; }
            b.updated_at = Utc::now();
            b.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |b| b.id == id))
    }
}

// --- AGENDAMENTOS ---

#[derive(Default)]
pub struct MemoryAgendamentoStore {
    rows: Mutex<Vec<Agendamento>>,
}

#[async_trait]
impl AgendamentoStore for MemoryAgendamentoStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Agendamento>, AppError> {
        Ok(page_of(self.rows.lock().unwrap().iter().cloned(), page))
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<Agendamento>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(page_of(rows.iter().filter(|a| a.client_id == client_id).cloned(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agendamento>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_conflicting(
        &self,
        client_id: Uuid,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Agendamento>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.client_id == client_id)
            .filter(|a| a.data_hora > after && a.data_hora < before)
            .filter(|a| Some(a.id) != exclude_id)
            .cloned()
            .collect())
    }

    async fn create(&self, payload: &CreateAgendamentoPayload) -> Result<Agendamento, AppError> {
        let now = Utc::now();
        let row = Agendamento {
            id: Uuid::new_v4(),
            client_id: payload.client_id,
            titulo: payload.titulo.clone(),
            descricao: payload.descricao.clone(),
            data_hora: payload.data_hora,
            local: payload.local.clone(),
            link: payload.link.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, payload: &UpdateAgendamentoPayload) -> Result<Option<Agendamento>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|a| a.id == id).map(|a| {
            if let Some(v) = &payload.titulo { a.titulo = v.clone(); }
            if let Some(v) = &payload.descricao { a.descricao = Some(v.clone()); }
            if let Some(v) = payload.data_hora { a.data_hora = v; }
            if let Some(v) = &payload.local { a.local = Some(v.clone()); }
            if let Some(v) = &payload.link { a.link = Some(v.clone()); }
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |a| a.id == id))
    }
}

// --- ENDEREÇOS ---

#[derive(Default)]
pub struct MemoryEnderecoStore {
    rows: Mutex<Vec<Endereco>>,
}

#[async_trait]
impl EnderecoStore for MemoryEnderecoStore {
    async fn list(&self) -> Result<Vec<Endereco>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Endereco>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Option<Endereco>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.client_id == client_id)
            .cloned())
    }

    async fn create(&self, new: NewEndereco) -> Result<Endereco, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|e| e.client_id == new.client_id) {
            return Err(AppError::Conflict(messages::ADDRESS_EXISTS.into()));
        }
        let now = Utc::now();
        let row = Endereco {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            cep: new.cep,
            endereco: new.lookup.endereco,
            numero: new.numero,
            complemento: new.complemento,
            bairro: new.lookup.bairro,
            cidade: new.lookup.cidade,
            estado: new.lookup.estado,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: EnderecoChanges) -> Result<Option<Endereco>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|e| e.id == id).map(|e| {
            if let Some(v) = changes.cep { e.cep = v; }
            if let Some(v) = changes.numero { e.numero = v; }
            if let Some(v) = changes.complemento { e.complemento = Some(v); }
            if let Some(lookup) = changes.lookup {
                e.endereco = lookup.endereco.or(e.endereco.take());
                e.bairro = lookup.bairro.or(e.bairro.take());
                e.cidade = lookup.cidade.or(e.cidade.take());
                e.estado = lookup.estado.or(e.estado.take());
            }
            e.updated_at = Utc::now();
            e.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.rows.lock().unwrap(), |e| e.id == id))
    }
}

// --- TOKENS DE REDEFINIÇÃO ---

#[derive(Default)]
pub struct MemoryPasswordResetStore {
    rows: Mutex<Vec<PasswordResetToken>>,
}

impl MemoryPasswordResetStore {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn tokens_for(&self, email: &str) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.email == email)
            .map(|t| t.token.clone())
            .collect()
    }

    /// Força o vencimento de um token já emitido.
    pub fn expire(&self, token: &str) {
        if let Some(t) = self.rows.lock().unwrap().iter_mut().find(|t| t.token == token) {
            t.expires_at = Utc::now() - chrono::Duration::minutes(1);
        }
    }
}

#[async_trait]
impl PasswordResetStore for MemoryPasswordResetStore {
    async fn create(&self, email: &str, token: &str, expires_at: DateTime<Utc>) -> Result<PasswordResetToken, AppError> {
        let row = PasswordResetToken {
            id: Uuid::new_v4(),
            email: email.to_string(),
            token: token.to_string(),
            expires_at,
            used: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.token == token).cloned())
    }

    async fn consume(&self, token: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|t| t.token == token && !t.used) {
            Some(t) => {
                t.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
