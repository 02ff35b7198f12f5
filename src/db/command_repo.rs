// src/db/command_repo.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, models::command::CommandVm};

// Dados de referência: só leitura
#[derive(Clone)]
pub struct CommandRepository {
    pool: SqlitePool,
}

impl CommandRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<CommandVm>, AppError> {
        let commands =
            sqlx::query_as::<_, CommandVm>("SELECT id, name FROM commands ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(commands)
    }
}
