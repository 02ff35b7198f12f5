// src/services/rbac_service.rs

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    db::{PermissionRepository, RoleRepository},
    models::rbac::{PermissionVm, Role, RoleUpsertRequest, RoleVm, UpdatePermissionRequest},
};

#[derive(Clone)]
pub struct RbacService {
    role_repo: RoleRepository,
    permission_repo: PermissionRepository,
    pool: SqlitePool,
}

impl RbacService {
    pub fn new(
        role_repo: RoleRepository,
        permission_repo: PermissionRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            role_repo,
            permission_repo,
            pool,
        }
    }

    // --- CRUD de cargos ---

    pub async fn create_role(&self, request: &RoleUpsertRequest) -> Result<RoleVm, AppError> {
        let role = self
            .role_repo
            .create_role(&request.id, &request.name)
            .await?;
        Ok(role.into())
    }

    pub async fn list_roles(&self) -> Result<Vec<RoleVm>, AppError> {
        let roles = self.role_repo.list_roles().await?;
        Ok(roles.into_iter().map(RoleVm::from).collect())
    }

    pub async fn search_roles(&self, page: &PageQuery) -> Result<Pagination<RoleVm>, AppError> {
        self.role_repo.search_roles(page).await
    }

    pub async fn get_role(&self, id: &str) -> Result<RoleVm, AppError> {
        Ok(self.require_role(id).await?.into())
    }

    pub async fn update_role(
        &self,
        path_id: &str,
        request: &RoleUpsertRequest,
    ) -> Result<(), AppError> {
        if path_id != request.id {
            return Err(AppError::BadRequest(
                "O id do corpo difere do id da URL.".into(),
            ));
        }

        self.role_repo
            .update_role(path_id, &request.name)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".into()))?;
        Ok(())
    }

    pub async fn delete_role(&self, id: &str) -> Result<RoleVm, AppError> {
        // Política de cascata: as permissões do cargo caem junto com ele
        let role = self
            .role_repo
            .delete_role(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".into()))?;
        Ok(role.into())
    }

    // --- Permissões ---

    pub async fn get_role_permissions(&self, role_id: &str) -> Result<Vec<PermissionVm>, AppError> {
        self.require_role(role_id).await?;
        // Cargo sem permissão nenhuma devolve lista vazia, não erro
        self.permission_repo.list_by_role(role_id).await
    }

    // Substituição integral, nunca mesclagem: apaga o conjunto atual e insere
    // o novo, tudo em uma única transação. Ninguém observa o estado
    // intermediário vazio; entre substituições concorrentes vale a última que
    // comitar.
    pub async fn replace_role_permissions(
        &self,
        role_id: &str,
        request: &UpdatePermissionRequest,
    ) -> Result<(), AppError> {
        self.require_role(role_id).await?;

        // Pares repetidos na requisição são descartados em silêncio; a chave
        // composta do banco não aceitaria a duplicata de qualquer forma.
        let mut seen = HashSet::new();
        let new_permissions: Vec<_> = request
            .permissions
            .iter()
            .filter(|p| seen.insert((p.function_id.clone(), p.command_id.clone())))
            .collect();

        let mut tx = self.pool.begin().await?;

        let mut affected = self
            .permission_repo
            .delete_by_role(&mut *tx, role_id)
            .await?;

        for pair in &new_permissions {
            // function_id/command_id inexistente estoura a chave estrangeira
            // e nada é comitado
            self.permission_repo.insert(&mut *tx, role_id, pair).await?;
            affected += 1;
        }

        if affected == 0 {
            // Sem nada para apagar nem inserir; o rollback acontece no drop
            return Err(AppError::NoRowsAffected);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn require_role(&self, role_id: &str) -> Result<Role, AppError> {
        self.role_repo
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".into()))
    }
}
