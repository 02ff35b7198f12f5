// src/services/menu.rs

use std::sync::Arc;

use crate::{
    common::error::AppError, db::PermissionRepository, models::function::FunctionVm,
    services::identity::IdentityProvider,
};

// Resolve quais funções o usuário enxerga e entrega o menu já ordenado
#[derive(Clone)]
pub struct MenuService {
    identity: Arc<dyn IdentityProvider>,
    permission_repo: PermissionRepository,
}

impl MenuService {
    pub fn new(identity: Arc<dyn IdentityProvider>, permission_repo: PermissionRepository) -> Self {
        Self {
            identity,
            permission_repo,
        }
    }

    // O conjunto de funções visíveis (comando VIEW) através de qualquer um
    // dos cargos do usuário. Sem garantia de ordem; ordenar é papel do
    // compose_menu.
    pub async fn resolve_viewable_functions(
        &self,
        user_id: &str,
    ) -> Result<Vec<FunctionVm>, AppError> {
        self.identity
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        let role_names = self.identity.list_role_names(user_id).await?;
        if role_names.is_empty() {
            // Usuário sem cargo enxerga um menu vazio; não é erro
            return Ok(Vec::new());
        }

        self.permission_repo
            .viewable_functions_for_roles(&role_names)
            .await
    }

    pub async fn menu_for_user(&self, user_id: &str) -> Result<Vec<FunctionVm>, AppError> {
        let functions = self.resolve_viewable_functions(user_id).await?;
        Ok(compose_menu(functions))
    }
}

// Ordem total e determinística da lista plana de menu: parent_id (None antes
// de qualquer Some, depois lexicográfico), sort_order e, como desempate
// final, o id. O cliente remonta a hierarquia a partir do parent_id.
pub fn compose_menu(mut functions: Vec<FunctionVm>) -> Vec<FunctionVm> {
    functions.sort_by(|a, b| {
        a.parent_id
            .cmp(&b.parent_id)
            .then_with(|| a.sort_order.cmp(&b.sort_order))
            .then_with(|| a.id.cmp(&b.id))
    });
    functions
}
