// src/services/identity.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    models::user::{User, UserCreateRequest, UserUpdateRequest, UserVm},
};

// A fronteira com o subsistema de identidade. O resolvedor de permissões e os
// serviços só conhecem estas operações, nunca a implementação concreta — hoje
// um repositório sqlx, amanhã o que for.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn search_users(&self, page: &PageQuery) -> Result<Pagination<UserVm>, AppError>;

    // O hash da senha já chega pronto; quem sabe de bcrypt é o AuthService
    async fn create_user(
        &self,
        request: &UserCreateRequest,
        password_hash: &str,
    ) -> Result<User, AppError>;

    async fn update_user(
        &self,
        id: &str,
        request: &UserUpdateRequest,
    ) -> Result<Option<User>, AppError>;

    async fn delete_user(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn set_password_hash(&self, id: &str, password_hash: &str) -> Result<(), AppError>;

    // A associação usuário <-> cargo pertence à identidade, não ao domínio
    async fn list_role_names(&self, user_id: &str) -> Result<Vec<String>, AppError>;

    async fn assign_roles(&self, user_id: &str, role_names: &[String]) -> Result<(), AppError>;

    async fn remove_roles(&self, user_id: &str, role_names: &[String]) -> Result<(), AppError>;
}
