// src/db/function_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    models::function::{FunctionUpsertRequest, FunctionVm},
};

#[derive(Clone)]
pub struct FunctionRepository {
    pool: SqlitePool,
}

impl FunctionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &FunctionUpsertRequest) -> Result<FunctionVm, AppError> {
        let function = sqlx::query_as::<_, FunctionVm>(
            "INSERT INTO functions (id, name, url, sort_order, parent_id) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, name, url, sort_order, parent_id",
        )
        .bind(&request.id)
        .bind(&request.name)
        .bind(&request.url)
        .bind(request.sort_order)
        .bind(&request.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "Já existe uma função com esse id."))?;

        Ok(function)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<FunctionVm>, AppError> {
        let maybe_function = sqlx::query_as::<_, FunctionVm>(
            "SELECT id, name, url, sort_order, parent_id FROM functions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_function)
    }

    // Em SQLite a ordenação ASC já coloca NULL antes de qualquer valor, então
    // o ORDER BY reproduz exatamente a ordem do compositor de menu.
    pub async fn list_all(&self) -> Result<Vec<FunctionVm>, AppError> {
        let functions = sqlx::query_as::<_, FunctionVm>(
            "SELECT id, name, url, sort_order, parent_id FROM functions \
             ORDER BY parent_id, sort_order, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(functions)
    }

    pub async fn search(&self, page: &PageQuery) -> Result<Pagination<FunctionVm>, AppError> {
        // O filtro procura em id, nome e url
        let (total_records, items) = match page.like_pattern() {
            Some(pattern) => {
                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM functions \
                     WHERE id LIKE ? OR name LIKE ? OR url LIKE ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

                let items = sqlx::query_as::<_, FunctionVm>(
                    "SELECT id, name, url, sort_order, parent_id FROM functions \
                     WHERE id LIKE ? OR name LIKE ? OR url LIKE ? \
                     ORDER BY parent_id, sort_order, id LIMIT ? OFFSET ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .bind(page.take())
                .bind(page.skip())
                .fetch_all(&self.pool)
                .await?;

                (total, items)
            }
            None => {
                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM functions")
                    .fetch_one(&self.pool)
                    .await?;

                let items = sqlx::query_as::<_, FunctionVm>(
                    "SELECT id, name, url, sort_order, parent_id FROM functions \
                     ORDER BY parent_id, sort_order, id LIMIT ? OFFSET ?",
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

    pub async fn update(
        &self,
        id: &str,
        request: &FunctionUpsertRequest,
    ) -> Result<Option<FunctionVm>, AppError> {
        let maybe_function = sqlx::query_as::<_, FunctionVm>(
            "UPDATE functions SET name = ?, url = ?, sort_order = ?, parent_id = ? \
             WHERE id = ? \
             RETURNING id, name, url, sort_order, parent_id",
        )
        .bind(&request.name)
        .bind(&request.url)
        .bind(request.sort_order)
        .bind(&request.parent_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_fk_violation(e, "A função pai informada não existe."))?;

        Ok(maybe_function)
    }

    pub async fn delete(&self, id: &str) -> Result<Option<FunctionVm>, AppError> {
        // As permissões da função caem junto; subfunções bloqueiam a remoção
        let maybe_function = sqlx::query_as::<_, FunctionVm>(
            "DELETE FROM functions WHERE id = ? RETURNING id, name, url, sort_order, parent_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_fk_violation(e, "A função possui subfunções e não pode ser removida.")
        })?;

        Ok(maybe_function)
    }
}
