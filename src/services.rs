pub mod auth;
pub use auth::AuthService;
pub mod function_service;
pub use function_service::FunctionService;
pub mod identity;
pub use identity::IdentityProvider;
pub mod menu;
pub use menu::MenuService;
pub mod rbac_service;
pub use rbac_service::RbacService;
