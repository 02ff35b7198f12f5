// src/common/query.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// A consulta paginada como objeto de valor: filtro + página, validada uma
// única vez no handler e passada pronta para a função de execução do
// repositório. Nada de query builder mutável espalhado pelo código.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    // Trecho procurado (id/nome/url conforme a entidade)
    pub filter: Option<String>,

    #[validate(range(min = 1, message = "pageIndex começa em 1."))]
    pub page_index: i64,

    #[validate(range(min = 1, max = 100, message = "pageSize deve estar entre 1 e 100."))]
    pub page_size: i64,
}

impl PageQuery {
    // Deslocamento: (pageIndex - 1) * pageSize
    pub fn skip(&self) -> i64 {
        (self.page_index - 1) * self.page_size
    }

    pub fn take(&self) -> i64 {
        self.page_size
    }

    // Padrão LIKE já com curingas; None quando o filtro está vazio
    pub fn like_pattern(&self) -> Option<String> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| format!("%{}%", f))
    }
}

// O envelope de resposta paginada
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub total_records: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: i64, size: i64) -> PageQuery {
        PageQuery {
            filter: None,
            page_index: index,
            page_size: size,
        }
    }

    #[test]
    fn skip_is_previous_pages_times_page_size() {
        assert_eq!(page(1, 10).skip(), 0);
        assert_eq!(page(3, 10).skip(), 20);
        assert_eq!(page(2, 7).skip(), 7);
    }

    #[test]
    fn blank_filter_produces_no_pattern() {
        let mut q = page(1, 10);
        q.filter = Some("   ".into());
        assert!(q.like_pattern().is_none());

        q.filter = Some("menu".into());
        assert_eq!(q.like_pattern().as_deref(), Some("%menu%"));
    }

    #[test]
    fn page_bounds_are_validated() {
        assert!(page(0, 10).validate().is_err());
        assert!(page(1, 0).validate().is_err());
        assert!(page(1, 101).validate().is_err());
        assert!(page(1, 100).validate().is_ok());
    }
}
