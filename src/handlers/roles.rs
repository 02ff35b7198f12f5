// src/handlers/roles.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::query::{PageQuery, Pagination},
    config::AppState,
    models::rbac::{PermissionVm, RoleUpsertRequest, RoleVm, UpdatePermissionRequest},
};

// POST /api/roles
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Roles",
    request_body = RoleUpsertRequest,
    responses(
        (status = 201, description = "Cargo criado", body = RoleVm),
        (status = 409, description = "Id ou nome de cargo já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_role(
    State(app_state): State<AppState>,
    Json(payload): Json<RoleUpsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let role = app_state.rbac_service.create_role(&payload).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

// GET /api/roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    responses((status = 200, description = "Lista de cargos", body = Vec<RoleVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_roles(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<RoleVm>>, AppError> {
    let roles = app_state.rbac_service.list_roles().await?;
    Ok(Json(roles))
}

// GET /api/roles/filter?filter=&pageIndex=1&pageSize=10
#[utoipa::path(
    get,
    path = "/api/roles/filter",
    tag = "Roles",
    params(PageQuery),
    responses((status = 200, description = "Página de cargos", body = Pagination<RoleVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_roles_paging(
    State(app_state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Pagination<RoleVm>>, AppError> {
    page.validate().map_err(AppError::ValidationError)?;

    let pagination = app_state.rbac_service.search_roles(&page).await?;
    Ok(Json(pagination))
}

// GET /api/roles/{id}
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Id do cargo")),
    responses(
        (status = 200, description = "Cargo encontrado", body = RoleVm),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoleVm>, AppError> {
    let role = app_state.rbac_service.get_role(&id).await?;
    Ok(Json(role))
}

// PUT /api/roles/{id}
#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Id do cargo")),
    request_body = RoleUpsertRequest,
    responses(
        (status = 204, description = "Cargo atualizado"),
        (status = 400, description = "Id do corpo difere do id da URL"),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn put_role(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state.rbac_service.update_role(&id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/roles/{id}
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Id do cargo")),
    responses(
        (status = 200, description = "Cargo removido (permissões em cascata)", body = RoleVm),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoleVm>, AppError> {
    let role = app_state.rbac_service.delete_role(&id).await?;
    Ok(Json(role))
}

// GET /api/roles/{id}/permissions
#[utoipa::path(
    get,
    path = "/api/roles/{id}/permissions",
    tag = "Roles",
    params(("id" = String, Path, description = "Id do cargo")),
    responses(
        (status = 200, description = "Permissões do cargo", body = Vec<PermissionVm>),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_permissions_by_role(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PermissionVm>>, AppError> {
    let permissions = app_state.rbac_service.get_role_permissions(&id).await?;
    Ok(Json(permissions))
}

// PUT /api/roles/{id}/permissions — substituição integral do conjunto
#[utoipa::path(
    put,
    path = "/api/roles/{id}/permissions",
    tag = "Roles",
    params(("id" = String, Path, description = "Id do cargo")),
    request_body = UpdatePermissionRequest,
    responses(
        (status = 204, description = "Permissões substituídas"),
        (status = 400, description = "Função/comando inexistente ou nada a fazer"),
        (status = 404, description = "Cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn put_permissions_by_role(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePermissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .rbac_service
        .replace_role_permissions(&id, &payload)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
