// src/db/user_repo.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    models::user::{User, UserCreateRequest, UserUpdateRequest, UserVm},
    services::identity::IdentityProvider,
};

// O repositório de usuários: a implementação sqlx do IdentityProvider
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_name = ?")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY user_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn search_users(&self, page: &PageQuery) -> Result<Pagination<UserVm>, AppError> {
        // O filtro procura em user_name, e-mail e telefone
        let (total_records, users) = match page.like_pattern() {
            Some(pattern) => {
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users \
                     WHERE user_name LIKE ? OR email LIKE ? OR phone_number LIKE ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

                let users = sqlx::query_as::<_, User>(
                    "SELECT * FROM users \
                     WHERE user_name LIKE ? OR email LIKE ? OR phone_number LIKE ? \
                     ORDER BY user_name LIMIT ? OFFSET ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .bind(page.take())
                .bind(page.skip())
                .fetch_all(&self.pool)
                .await?;

                (total, users)
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await?;

                let users = sqlx::query_as::<_, User>(
                    "SELECT * FROM users ORDER BY user_name LIMIT ? OFFSET ?",
                )
                .bind(page.take())
                .bind(page.skip())
                .fetch_all(&self.pool)
                .await?;

                (total, users)
            }
        };

        Ok(Pagination {
            items: users.into_iter().map(UserVm::from).collect(),
            total_records,
        })
    }

    async fn create_user(
        &self,
        request: &UserCreateRequest,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users \
             (id, user_name, first_name, last_name, email, phone_number, dob, \
              password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&request.user_name)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(request.dob)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(e, "Já existe um usuário com esse user name.")
        })?;

        Ok(user)
    }

    async fn update_user(
        &self,
        id: &str,
        request: &UserUpdateRequest,
    ) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = ?, last_name = ?, dob = ?, updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.dob)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_user)
    }

    async fn delete_user(&self, id: &str) -> Result<Option<User>, AppError> {
        // user_roles cai junto via ON DELETE CASCADE
        let maybe_user = sqlx::query_as::<_, User>("DELETE FROM users WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn set_password_hash(&self, id: &str, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected);
        }
        Ok(())
    }

    async fn list_role_names(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT r.name FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = ? ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn assign_roles(&self, user_id: &str, role_names: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for name in role_names {
            let role_id = sqlx::query_scalar::<_, String>(
                "SELECT id FROM roles WHERE normalized_name = ?",
            )
            .bind(name.to_uppercase())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cargo '{}' não encontrado.", name)))?;

            // Atribuição repetida não é erro
            sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(&role_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_fk_violation(e, "Usuário inexistente."))?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn remove_roles(&self, user_id: &str, role_names: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for name in role_names {
            sqlx::query(
                "DELETE FROM user_roles WHERE user_id = ? \
                 AND role_id IN (SELECT id FROM roles WHERE normalized_name = ?)",
            )
            .bind(user_id)
            .bind(name.to_uppercase())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
