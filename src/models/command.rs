// src/models/command.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// O comando que marca uma função como visível no menu de navegação
pub const VIEW_COMMAND_ID: &str = "VIEW";

// Dados de referência, semeados por migração (VIEW, CREATE, UPDATE, DELETE)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommandVm {
    #[schema(example = "VIEW")]
    pub id: String,

    #[schema(example = "Visualizar")]
    pub name: String,
}
