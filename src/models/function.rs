// src/models/function.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Um nó de menu/navegação. A projeção para o cliente é a própria linha da
// tabela, então entidade e view model são a mesma struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionVm {
    #[schema(example = "CONTENT_KNOWLEDGEBASE")]
    pub id: String,

    #[schema(example = "Bases de conhecimento")]
    pub name: String,

    #[schema(example = "/content/knowledge-bases")]
    pub url: String,

    pub sort_order: i64,

    // None para funções de raiz
    pub parent_id: Option<String>,
}

// O cliente escolhe o id (ex.: "CONTENT"), tanto na criação quanto na
// atualização; na atualização o id do corpo precisa bater com o da URL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUpsertRequest {
    #[validate(length(min = 1, max = 50, message = "O id deve ter entre 1 e 50 caracteres."))]
    pub id: String,

    #[validate(length(min = 1, max = 200, message = "O nome deve ter entre 1 e 200 caracteres."))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "A url deve ter entre 1 e 200 caracteres."))]
    pub url: String,

    pub sort_order: i64,
    pub parent_id: Option<String>,
}
