// src/handlers/functions.rs

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
    models::function::{FunctionUpsertRequest, FunctionVm},
};

// POST /api/functions
#[utoipa::path(
    post,
    path = "/api/functions",
    tag = "Functions",
    request_body = FunctionUpsertRequest,
    responses(
        (status = 201, description = "Função criada", body = FunctionVm),
        (status = 400, description = "Pai inexistente ou hierarquia inválida"),
        (status = 409, description = "Id de função já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_function(
    State(app_state): State<AppState>,
    Json(payload): Json<FunctionUpsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let function = app_state.function_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(function)))
}

// GET /api/functions
#[utoipa::path(
    get,
    path = "/api/functions",
    tag = "Functions",
    responses((status = 200, description = "Lista de funções", body = Vec<FunctionVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_functions(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<FunctionVm>>, AppError> {
    let functions = app_state.function_service.list().await?;
    Ok(Json(functions))
}

// GET /api/functions/filter?filter=&pageIndex=1&pageSize=10
#[utoipa::path(
    get,
    path = "/api/functions/filter",
    tag = "Functions",
    params(PageQuery),
    responses((status = 200, description = "Página de funções", body = Pagination<FunctionVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_functions_paging(
    State(app_state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Pagination<FunctionVm>>, AppError> {
    page.validate().map_err(AppError::ValidationError)?;

    let pagination = app_state.function_service.search(&page).await?;
    Ok(Json(pagination))
}

// GET /api/functions/{id}
#[utoipa::path(
    get,
    path = "/api/functions/{id}",
    tag = "Functions",
    params(("id" = String, Path, description = "Id da função")),
    responses(
        (status = 200, description = "Função encontrada", body = FunctionVm),
        (status = 404, description = "Função não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FunctionVm>, AppError> {
    let function = app_state.function_service.get(&id).await?;
    Ok(Json(function))
}

// PUT /api/functions/{id}
#[utoipa::path(
    put,
    path = "/api/functions/{id}",
    tag = "Functions",
    params(("id" = String, Path, description = "Id da função")),
    request_body = FunctionUpsertRequest,
    responses(
        (status = 204, description = "Função atualizada"),
        (status = 400, description = "Id divergente, pai inexistente ou ciclo"),
        (status = 404, description = "Função não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn put_function(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FunctionUpsertRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state.function_service.update(&id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/functions/{id}
#[utoipa::path(
    delete,
    path = "/api/functions/{id}",
    tag = "Functions",
    params(("id" = String, Path, description = "Id da função")),
    responses(
        (status = 200, description = "Função removida", body = FunctionVm),
        (status = 400, description = "Função possui subfunções"),
        (status = 404, description = "Função não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_function(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FunctionVm>, AppError> {
    let function = app_state.function_service.delete(&id).await?;
    Ok(Json(function))
}
