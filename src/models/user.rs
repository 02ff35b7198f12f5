// src/models/user.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// O que sai do banco (tabela users). O hash de senha fica só aqui dentro e
// nunca chega na camada de resposta.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub dob: NaiveDate,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que vai para o cliente
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserVm {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,

    #[schema(example = "ana.souza")]
    pub user_name: String,

    pub first_name: String,
    pub last_name: String,

    #[schema(example = "ana.souza@example.com")]
    pub email: String,

    pub phone_number: Option<String>,
    pub dob: NaiveDate,
}

impl From<User> for UserVm {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            dob: user.dob,
        }
    }
}

// O payload para criar um usuário (o id é gerado pelo servidor)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(length(min = 3, max = 50, message = "O user name deve ter entre 3 e 50 caracteres."))]
    pub user_name: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 1, max = 50, message = "O primeiro nome deve ter entre 1 e 50 caracteres."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "O sobrenome deve ter entre 1 e 50 caracteres."))]
    pub last_name: String,

    pub phone_number: Option<String>,
    pub dob: NaiveDate,
}

// A atualização só toca nos dados pessoais; user_name e e-mail são imutáveis
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[validate(length(min = 1, max = 50, message = "O primeiro nome deve ter entre 1 e 50 caracteres."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "O sobrenome deve ter entre 1 e 50 caracteres."))]
    pub last_name: String,

    pub dob: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "A senha atual é obrigatória."))]
    pub current_password: String,

    #[validate(length(min = 6, message = "A nova senha deve ter no mínimo 6 caracteres."))]
    pub new_password: String,
}

// Vínculo usuário <-> cargos, sempre por nome de cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesRequest {
    #[validate(length(min = 1, message = "Informe ao menos um cargo."))]
    pub role_names: Vec<String>,
}
