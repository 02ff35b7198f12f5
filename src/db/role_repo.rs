// src/db/role_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    models::rbac::{Role, RoleVm},
};

#[derive(Clone)]
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_role(&self, id: &str, name: &str) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>(
            "INSERT INTO roles (id, name, normalized_name) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(name.to_uppercase())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(e, "Já existe um cargo com esse id ou nome.")
        })?;

        Ok(role)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Role>, AppError> {
        let maybe_role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_role)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn search_roles(&self, page: &PageQuery) -> Result<Pagination<RoleVm>, AppError> {
        // O filtro procura em id e nome
        let (total_records, items) = match page.like_pattern() {
            Some(pattern) => {
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM roles WHERE id LIKE ? OR name LIKE ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

                let items = sqlx::query_as::<_, RoleVm>(
                    "SELECT id, name FROM roles WHERE id LIKE ? OR name LIKE ? \
                     ORDER BY name LIMIT ? OFFSET ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(page.take())
                .bind(page.skip())
                .fetch_all(&self.pool)
                .await?;

                (total, items)
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
                    .fetch_one(&self.pool)
                    .await?;

                let items = sqlx::query_as::<_, RoleVm>(
                    "SELECT id, name FROM roles ORDER BY name LIMIT ? OFFSET ?",
                )
                .bind(page.take())
                .bind(page.skip())
                .fetch_all(&self.pool)
                .await?;

                (total, items)
            }
        };

        Ok(Pagination {
            items,
            total_records,
        })
    }

    pub async fn update_role(&self, id: &str, name: &str) -> Result<Option<Role>, AppError> {
        let maybe_role = sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = ?, normalized_name = ? WHERE id = ? RETURNING *",
        )
        .bind(name)
        .bind(name.to_uppercase())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Já existe um cargo com esse nome."))?;

        Ok(maybe_role)
    }

    pub async fn delete_role(&self, id: &str) -> Result<Option<Role>, AppError> {
        // As permissões e os vínculos de usuário caem junto (ON DELETE CASCADE)
        let maybe_role = sqlx::query_as::<_, Role>("DELETE FROM roles WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_role)
    }
}
