pub mod command_repo;
pub use command_repo::CommandRepository;
pub mod function_repo;
pub use function_repo::FunctionRepository;
pub mod permission_repo;
pub use permission_repo::PermissionRepository;
pub mod role_repo;
pub use role_repo::RoleRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

// As migrações embutidas no binário; rodam na subida do servidor e na
// preparação das pools de teste.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        // Sem isso o SQLite não valida chave estrangeira nenhuma
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}
