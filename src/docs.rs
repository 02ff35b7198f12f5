// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::post_user,
        handlers::users::get_users,
        handlers::users::get_users_paging,
        handlers::users::get_by_id,
        handlers::users::put_user,
        handlers::users::delete_user,
        handlers::users::change_password,
        handlers::users::get_user_roles,
        handlers::users::post_user_roles,
        handlers::users::delete_user_roles,
        handlers::users::get_user_menu,

        // --- Roles ---
        handlers::roles::post_role,
        handlers::roles::get_roles,
        handlers::roles::get_roles_paging,
        handlers::roles::get_by_id,
        handlers::roles::put_role,
        handlers::roles::delete_role,
        handlers::roles::get_permissions_by_role,
        handlers::roles::put_permissions_by_role,

        // --- Functions ---
        handlers::functions::post_function,
        handlers::functions::get_functions,
        handlers::functions::get_functions_paging,
        handlers::functions::get_by_id,
        handlers::functions::put_function,
        handlers::functions::delete_function,

        // --- Commands ---
        handlers::commands::get_commands,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Users ---
            models::user::UserVm,
            models::user::UserCreateRequest,
            models::user::UserUpdateRequest,
            models::user::ChangePasswordRequest,
            models::user::UserRolesRequest,

            // --- RBAC ---
            models::rbac::RoleVm,
            models::rbac::RoleUpsertRequest,
            models::rbac::PermissionVm,
            models::rbac::PermissionPair,
            models::rbac::UpdatePermissionRequest,

            // --- Functions ---
            models::function::FunctionVm,
            models::function::FunctionUpsertRequest,

            // --- Commands ---
            models::command::CommandVm,

            // --- Paginação ---
            common::query::Pagination<models::user::UserVm>,
            common::query::Pagination<models::rbac::RoleVm>,
            common::query::Pagination<models::function::FunctionVm>,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Usuários, cargos do usuário e menu"),
        (name = "Roles", description = "Cargos e suas permissões"),
        (name = "Functions", description = "Funções (nós de menu/navegação)"),
        (name = "Commands", description = "Comandos (verbos de ação)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
