// src/db/permission_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::command::VIEW_COMMAND_ID,
    models::function::FunctionVm,
    models::rbac::{PermissionPair, PermissionVm},
};

#[derive(Clone)]
pub struct PermissionRepository {
    pool: SqlitePool,
}

impl PermissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_by_role(&self, role_id: &str) -> Result<Vec<PermissionVm>, AppError> {
        let permissions = sqlx::query_as::<_, PermissionVm>(
            "SELECT function_id, command_id, role_id FROM permissions \
             WHERE role_id = ? ORDER BY function_id, command_id",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    // As duas operações abaixo recebem o executor para rodarem dentro da
    // transação de substituição aberta pelo serviço.
    pub async fn delete_by_role<'e, E>(&self, executor: E, role_id: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM permissions WHERE role_id = ?")
            .bind(role_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        role_id: &str,
        pair: &PermissionPair,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO permissions (function_id, role_id, command_id) VALUES (?, ?, ?)")
            .bind(&pair.function_id)
            .bind(role_id)
            .bind(&pair.command_id)
            .execute(executor)
            .await
            .map_err(|e| {
                AppError::from_fk_violation(
                    e,
                    "Função ou comando inexistente na permissão informada.",
                )
            })?;
        Ok(())
    }

    // O coração do resolvedor: funções alcançáveis com o comando VIEW por
    // qualquer um dos cargos informados, sem duplicatas e sem ordem garantida.
    pub async fn viewable_functions_for_roles(
        &self,
        role_names: &[String],
    ) -> Result<Vec<FunctionVm>, AppError> {
        if role_names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::<Sqlite>::new(
            "SELECT DISTINCT f.id, f.name, f.url, f.sort_order, f.parent_id \
             FROM functions f \
             JOIN permissions p ON p.function_id = f.id \
             JOIN roles r ON r.id = p.role_id \
             JOIN commands c ON c.id = p.command_id \
             WHERE c.id = ",
        );
        query.push_bind(VIEW_COMMAND_ID);
        query.push(" AND r.name IN (");
        let mut names = query.separated(", ");
        for name in role_names {
            names.push_bind(name);
        }
        names.push_unseparated(")");

        let functions = query
            .build_query_as::<FunctionVm>()
            .fetch_all(&self.pool)
            .await?;
        Ok(functions)
    }
}
