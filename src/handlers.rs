pub mod auth;
pub mod commands;
pub mod functions;
pub mod roles;
pub mod users;
