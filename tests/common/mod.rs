// tests/common/mod.rs
#![allow(dead_code)]

use std::str::FromStr;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use kb_backend::{
    build_router,
    config::AppState,
    db::MIGRATOR,
    models::user::UserCreateRequest,
};

pub const JWT_SECRET: &str = "segredo-de-teste";

// Uma aplicação completa sobre um SQLite em memória. Uma única conexão na
// pool: cada conexão nova de ":memory:" seria um banco vazio diferente.
pub async fn test_app() -> (Router, AppState) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("opções do sqlite")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("pool em memória");

    MIGRATOR.run(&pool).await.expect("migrações");

    let state = AppState::with_pool(pool, JWT_SECRET.to_string());
    (build_router(state.clone()), state)
}

pub fn user_request(user_name: &str) -> UserCreateRequest {
    UserCreateRequest {
        user_name: user_name.to_string(),
        password: "senha-123".to_string(),
        email: format!("{}@example.com", user_name),
        first_name: "Maria".to_string(),
        last_name: "Silva".to_string(),
        phone_number: None,
        dob: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
    }
}

// Cria um usuário direto pelo serviço e devolve (id, token) para autenticar
// as chamadas do teste
pub async fn seed_user(state: &AppState, user_name: &str) -> (String, String) {
    let user = state
        .auth_service
        .register_user(&user_request(user_name))
        .await
        .expect("criar usuário");
    let token = state
        .auth_service
        .issue_token(&user.id)
        .expect("emitir token");
    (user.id, token)
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("corpo da resposta");
    serde_json::from_slice(&bytes).expect("json da resposta")
}

// --- Semeadura via API, como um cliente de verdade faria ---

pub async fn create_role(app: &Router, token: &str, id: &str, name: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/roles",
            token,
            serde_json::json!({ "id": id, "name": name }),
        ))
        .await
        .expect("criar cargo");
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub async fn create_function(
    app: &Router,
    token: &str,
    id: &str,
    sort_order: i64,
    parent_id: Option<&str>,
) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/functions",
            token,
            serde_json::json!({
                "id": id,
                "name": format!("Função {}", id),
                "url": format!("/{}", id.to_lowercase()),
                "sortOrder": sort_order,
                "parentId": parent_id,
            }),
        ))
        .await
        .expect("criar função");
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub async fn put_permissions(
    app: &Router,
    token: &str,
    role_id: &str,
    pairs: &[(&str, &str)],
) -> StatusCode {
    let permissions: Vec<serde_json::Value> = pairs
        .iter()
        .map(|(function_id, command_id)| {
            serde_json::json!({ "functionId": function_id, "commandId": command_id })
        })
        .collect();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/roles/{}/permissions", role_id),
            token,
            serde_json::json!({ "permissions": permissions }),
        ))
        .await
        .expect("substituir permissões");
    response.status()
}

pub async fn get_permissions(app: &Router, token: &str, role_id: &str) -> Vec<(String, String)> {
    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/roles/{}/permissions", role_id),
            token,
        ))
        .await
        .expect("ler permissões");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body.as_array()
        .expect("lista de permissões")
        .iter()
        .map(|p| {
            (
                p["functionId"].as_str().unwrap().to_string(),
                p["commandId"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}
