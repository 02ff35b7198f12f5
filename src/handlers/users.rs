// src/handlers/users.rs

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
    models::function::FunctionVm,
    models::user::{
        ChangePasswordRequest, User, UserCreateRequest, UserRolesRequest, UserUpdateRequest,
        UserVm,
    },
};

async fn require_user(app_state: &AppState, id: &str) -> Result<User, AppError> {
    app_state
        .identity
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "Usuário criado", body = UserVm),
        (status = 409, description = "User name já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_user(
    State(app_state): State<AppState>,
    Json(payload): Json<UserCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.auth_service.register_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "Lista de usuários", body = Vec<UserVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserVm>>, AppError> {
    let users = app_state.identity.list_users().await?;
    Ok(Json(users.into_iter().map(UserVm::from).collect()))
}

// GET /api/users/filter?filter=&pageIndex=1&pageSize=10
#[utoipa::path(
    get,
    path = "/api/users/filter",
    tag = "Users",
    params(PageQuery),
    responses((status = 200, description = "Página de usuários", body = Pagination<UserVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_users_paging(
    State(app_state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Pagination<UserVm>>, AppError> {
    page.validate().map_err(AppError::ValidationError)?;

    let pagination = app_state.identity.search_users(&page).await?;
    Ok(Json(pagination))
}

// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = UserVm),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserVm>, AppError> {
    let user = require_user(&app_state, &id).await?;
    Ok(Json(user.into()))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    request_body = UserUpdateRequest,
    responses(
        (status = 204, description = "Usuário atualizado"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn put_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .identity
        .update_user(&id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário removido", body = UserVm),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserVm>, AppError> {
    let user = app_state
        .identity
        .delete_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

    Ok(Json(user.into()))
}

// PUT /api/users/{id}/change-password
#[utoipa::path(
    put,
    path = "/api/users/{id}/change-password",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Senha alterada"),
        (status = 401, description = "Senha atual incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .auth_service
        .change_password(&id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/users/{id}/roles
#[utoipa::path(
    get,
    path = "/api/users/{id}/roles",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    responses((status = 200, description = "Nomes dos cargos do usuário", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn get_user_roles(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    require_user(&app_state, &id).await?;

    let role_names = app_state.identity.list_role_names(&id).await?;
    Ok(Json(role_names))
}

// POST /api/users/{id}/roles
#[utoipa::path(
    post,
    path = "/api/users/{id}/roles",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    request_body = UserRolesRequest,
    responses(
        (status = 204, description = "Cargos atribuídos"),
        (status = 404, description = "Usuário ou cargo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_user_roles(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserRolesRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    require_user(&app_state, &id).await?;

    app_state
        .identity
        .assign_roles(&id, &payload.role_names)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/users/{id}/roles
#[utoipa::path(
    delete,
    path = "/api/users/{id}/roles",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    request_body = UserRolesRequest,
    responses(
        (status = 204, description = "Cargos removidos"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user_roles(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserRolesRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    require_user(&app_state, &id).await?;

    app_state
        .identity
        .remove_roles(&id, &payload.role_names)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/users/{id}/menu — o menu de navegação que o usuário pode ver,
// filtrado pelo comando VIEW e já na ordem final
#[utoipa::path(
    get,
    path = "/api/users/{id}/menu",
    tag = "Users",
    params(("id" = String, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Menu do usuário", body = Vec<FunctionVm>),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user_menu(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FunctionVm>>, AppError> {
    let menu = app_state.menu_service.menu_for_user(&id).await?;
    Ok(Json(menu))
}
