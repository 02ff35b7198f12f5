// src/handlers/commands.rs

use axum::{extract::State, Json};

use crate::{common::error::AppError, config::AppState, models::command::CommandVm};

// GET /api/commands (para o frontend montar a tela de permissões)
#[utoipa::path(
    get,
    path = "/api/commands",
    tag = "Commands",
    responses((status = 200, description = "Lista de comandos", body = Vec<CommandVm>)),
    security(("api_jwt" = []))
)]
pub async fn get_commands(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CommandVm>>, AppError> {
    let commands = app_state.command_repo.list_all().await?;
    Ok(Json(commands))
}
