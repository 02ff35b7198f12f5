// src/services/function_service.rs

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    db::FunctionRepository,
    models::function::{FunctionUpsertRequest, FunctionVm},
};

// O esquema não impede ciclo em parent_id; o limite vale como trava de
// segurança para a subida na árvore.
const MAX_TREE_DEPTH: usize = 64;

#[derive(Clone)]
pub struct FunctionService {
    repo: FunctionRepository,
}

impl FunctionService {
    pub fn new(repo: FunctionRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: &FunctionUpsertRequest) -> Result<FunctionVm, AppError> {
        self.validate_parent(&request.id, request.parent_id.as_deref())
            .await?;
        self.repo.create(request).await
    }

    pub async fn list(&self) -> Result<Vec<FunctionVm>, AppError> {
        self.repo.list_all().await
    }

    pub async fn search(&self, page: &PageQuery) -> Result<Pagination<FunctionVm>, AppError> {
        self.repo.search(page).await
    }

    pub async fn get(&self, id: &str) -> Result<FunctionVm, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Função não encontrada.".into()))
    }

    pub async fn update(
        &self,
        path_id: &str,
        request: &FunctionUpsertRequest,
    ) -> Result<(), AppError> {
        if path_id != request.id {
            return Err(AppError::BadRequest(
                "O id do corpo difere do id da URL.".into(),
            ));
        }

        self.validate_parent(path_id, request.parent_id.as_deref())
            .await?;

        self.repo
            .update(path_id, request)
            .await?
            .ok_or_else(|| AppError::NotFound("Função não encontrada.".into()))?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<FunctionVm, AppError> {
        self.repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Função não encontrada.".into()))
    }

    // Garante que o pai existe e que a nova ligação não fecha ciclo: sobe a
    // cadeia de pais a partir do novo pai; reencontrar o próprio id fecharia
    // um ciclo.
    async fn validate_parent(&self, id: &str, parent_id: Option<&str>) -> Result<(), AppError> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };

        if parent_id == id {
            return Err(AppError::BadRequest(
                "Uma função não pode ser pai de si mesma.".into(),
            ));
        }

        let mut current = parent_id.to_string();
        for _ in 0..MAX_TREE_DEPTH {
            let Some(node) = self.repo.find_by_id(&current).await? else {
                return Err(AppError::BadRequest(
                    "A função pai informada não existe.".into(),
                ));
            };

            match node.parent_id {
                Some(next) if next == id => {
                    return Err(AppError::BadRequest(
                        "A hierarquia de funções não pode formar ciclos.".into(),
                    ));
                }
                Some(next) => current = next,
                None => return Ok(()),
            }
        }

        Err(AppError::BadRequest(
            "A hierarquia de funções é profunda demais.".into(),
        ))
    }
}
