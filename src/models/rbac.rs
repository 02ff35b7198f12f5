// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// O que sai do banco (tabela roles). O nome normalizado só serve para a
// unicidade sem diferenciar maiúsculas/minúsculas.
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleVm {
    #[schema(example = "admin")]
    pub id: String,

    #[schema(example = "Administrador")]
    pub name: String,
}

impl From<Role> for RoleVm {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

// Criação e atualização usam o mesmo formato; na atualização o id do corpo
// precisa bater com o id da URL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpsertRequest {
    #[validate(length(min = 1, max = 50, message = "O id deve ter entre 1 e 50 caracteres."))]
    pub id: String,

    #[validate(length(min = 1, max = 50, message = "O nome deve ter entre 1 e 50 caracteres."))]
    pub name: String,
}

// Uma linha da tabela permissions, do jeito que o cliente enxerga
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionVm {
    #[schema(example = "CONTENT_KNOWLEDGEBASE")]
    pub function_id: String,

    #[schema(example = "VIEW")]
    pub command_id: String,

    #[schema(example = "admin")]
    pub role_id: String,
}

// Um item da substituição de permissões: o cargo vem da URL, não do corpo
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPair {
    pub function_id: String,
    pub command_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionRequest {
    pub permissions: Vec<PermissionPair>,
}
