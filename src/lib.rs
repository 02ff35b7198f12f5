// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Monta o router completo; os testes de integração usam exatamente o mesmo
// router que o binário sobe.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/",
            post(handlers::users::post_user).get(handlers::users::get_users),
        )
        .route("/filter", get(handlers::users::get_users_paging))
        .route(
            "/{id}",
            get(handlers::users::get_by_id)
                .put(handlers::users::put_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/{id}/change-password",
            put(handlers::users::change_password),
        )
        .route(
            "/{id}/roles",
            get(handlers::users::get_user_roles)
                .post(handlers::users::post_user_roles)
                .delete(handlers::users::delete_user_roles),
        )
        .route("/{id}/menu", get(handlers::users::get_user_menu));

    let role_routes = Router::new()
        .route(
            "/",
            post(handlers::roles::post_role).get(handlers::roles::get_roles),
        )
        .route("/filter", get(handlers::roles::get_roles_paging))
        .route(
            "/{id}",
            get(handlers::roles::get_by_id)
                .put(handlers::roles::put_role)
                .delete(handlers::roles::delete_role),
        )
        .route(
            "/{id}/permissions",
            get(handlers::roles::get_permissions_by_role)
                .put(handlers::roles::put_permissions_by_role),
        );

    let function_routes = Router::new()
        .route(
            "/",
            post(handlers::functions::post_function).get(handlers::functions::get_functions),
        )
        .route("/filter", get(handlers::functions::get_functions_paging))
        .route(
            "/{id}",
            get(handlers::functions::get_by_id)
                .put(handlers::functions::put_function)
                .delete(handlers::functions::delete_function),
        );

    let command_routes = Router::new().route("/", get(handlers::commands::get_commands));

    // Tudo que mexe com dados fica atrás do guardião de autenticação
    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::get_me))
        .nest("/api/users", user_routes)
        .nest("/api/roles", role_routes)
        .nest("/api/functions", function_routes)
        .nest("/api/commands", command_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .with_state(app_state)
}
