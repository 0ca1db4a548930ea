// src/common/pagination.rs

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct Pagination {
    /// Quantidade de registros (padrão 10)
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[param(example = 10)]
    pub limit: i64,

    /// Deslocamento (padrão 0)
    #[validate(range(min = 0, message = "offset must not be negative"))]
    #[param(example = 0)]
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Listagem de clientes: paginação + busca textual opcional.
/// Os campos ficam "achatados" aqui porque `serde(flatten)` não convive bem com query strings numéricas.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ClientListQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,

    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: i64,

    /// Busca (case-insensitive) em nome, e-mail, CPF e telefone
    pub search: Option<String>,
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            search: None,
        }
    }
}

impl ClientListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Termo de busca normalizado; string vazia conta como "sem busca".
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ten_and_zero() {
        let page: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Pagination { limit: 10, offset: 0 });
        assert!(page.validate().is_ok());
    }

    #[test]
    fn limit_out_of_range_is_rejected() {
        let page = Pagination { limit: 0, offset: 0 };
        assert!(page.validate().is_err());
        let page = Pagination { limit: MAX_LIMIT + 1, offset: 0 };
        assert!(page.validate().is_err());
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ClientListQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), None);

        let query = ClientListQuery {
            search: Some(" silva ".into()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), Some("silva"));
    }
}
