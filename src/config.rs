// src/config.rs

use std::{env, sync::Arc};

use sqlx::SqlitePool;

use crate::{
    db::{
        self, CommandRepository, FunctionRepository, PermissionRepository, RoleRepository,
        UserRepository,
    },
    services::{
        AuthService, FunctionService, IdentityProvider, MenuService, RbacService,
    },
};

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_secret: String,
    pub identity: Arc<dyn IdentityProvider>,
    pub auth_service: AuthService,
    pub menu_service: MenuService,
    pub rbac_service: RbacService,
    pub function_service: FunctionService,
    pub command_repo: CommandRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = db::connect(&database_url).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, jwt_secret))
    }

    // Monta o gráfico de dependências sobre uma pool já criada (os testes
    // passam uma pool SQLite em memória por aqui).
    pub fn with_pool(db_pool: SqlitePool, jwt_secret: String) -> Self {
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(UserRepository::new(db_pool.clone()));
        let role_repo = RoleRepository::new(db_pool.clone());
        let permission_repo = PermissionRepository::new(db_pool.clone());

        let auth_service = AuthService::new(identity.clone(), jwt_secret.clone());
        let menu_service = MenuService::new(identity.clone(), permission_repo.clone());
        let rbac_service = RbacService::new(role_repo, permission_repo, db_pool.clone());
        let function_service = FunctionService::new(FunctionRepository::new(db_pool.clone()));
        let command_repo = CommandRepository::new(db_pool.clone());

        Self {
            db_pool,
            jwt_secret,
            identity,
            auth_service,
            menu_service,
            rbac_service,
            function_service,
            command_repo,
        }
    }
}
