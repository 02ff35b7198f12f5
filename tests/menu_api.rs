// tests/menu_api.rs
//
// O menu de um usuário: as funções com permissão VIEW por algum dos cargos
// dele, deduplicadas e na ordem (parent_id, sort_order, id).

mod common;

use axum::http::StatusCode;
use common::{
    create_function, create_role, get_request, json_request, put_permissions, read_json,
    seed_user, test_app,
};
use tower::ServiceExt;

async fn assign_roles(
    app: &axum::Router,
    token: &str,
    user_id: &str,
    role_names: &[&str],
) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/users/{}/roles", user_id),
            token,
            serde_json::json!({ "roleNames": role_names }),
        ))
        .await
        .expect("atribuir cargos");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

async fn fetch_menu_ids(app: &axum::Router, token: &str, user_id: &str) -> Vec<String> {
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{}/menu", user_id), token))
        .await
        .expect("buscar menu");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body.as_array()
        .expect("lista de funções")
        .iter()
        .map(|f| f["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn menu_contains_a_function_iff_some_role_grants_view_on_it() {
    let (app, state) = test_app().await;
    let (admin_id, token) = seed_user(&state, "admin").await;

    // Árvore: DASH e CONTENT e ADMIN na raiz; KB e LABEL sob CONTENT
    create_function(&app, &token, "DASH", 1, None).await;
    create_function(&app, &token, "CONTENT", 2, None).await;
    create_function(&app, &token, "ADMIN", 3, None).await;
    create_function(&app, &token, "KB", 1, Some("CONTENT")).await;
    create_function(&app, &token, "LABEL", 2, Some("CONTENT")).await;

    create_role(&app, &token, "editor", "Editor").await;
    create_role(&app, &token, "gestor", "Gestor").await;

    // editor enxerga CONTENT e KB; o CREATE em LABEL não dá visibilidade
    assert_eq!(
        put_permissions(
            &app,
            &token,
            "editor",
            &[("CONTENT", "VIEW"), ("KB", "VIEW"), ("LABEL", "CREATE")],
        )
        .await,
        StatusCode::NO_CONTENT
    );
    // gestor repete CONTENT e soma ADMIN; a repetição não pode duplicar
    assert_eq!(
        put_permissions(&app, &token, "gestor", &[("CONTENT", "VIEW"), ("ADMIN", "VIEW")]).await,
        StatusCode::NO_CONTENT
    );

    assign_roles(&app, &token, &admin_id, &["editor", "gestor"]).await;

    let menu = fetch_menu_ids(&app, &token, &admin_id).await;

    // Raízes por sort_order (CONTENT=2, ADMIN=3), filhos agrupados depois;
    // DASH (sem permissão) e LABEL (sem VIEW) ficam de fora
    assert_eq!(menu, vec!["CONTENT", "ADMIN", "KB"]);

    // Ordem determinística: chamadas repetidas devolvem o mesmo resultado
    let again = fetch_menu_ids(&app, &token, &admin_id).await;
    assert_eq!(menu, again);
}

#[tokio::test]
async fn user_without_roles_gets_an_empty_menu() {
    let (app, state) = test_app().await;
    let (user_id, token) = seed_user(&state, "sem-cargo").await;

    let menu = fetch_menu_ids(&app, &token, &user_id).await;
    assert!(menu.is_empty());
}

#[tokio::test]
async fn menu_of_unknown_user_returns_not_found() {
    let (app, state) = test_app().await;
    let (_, token) = seed_user(&state, "admin").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/users/fantasma/menu", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn menu_requires_authentication() {
    let (app, state) = test_app().await;
    let (user_id, _) = seed_user(&state, "admin").await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri(format!("/api/users/{}/menu", user_id))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn menu_shrinks_when_a_role_is_removed_from_the_user() {
    let (app, state) = test_app().await;
    let (user_id, token) = seed_user(&state, "admin").await;

    create_function(&app, &token, "DASH", 1, None).await;
    create_function(&app, &token, "ADMIN", 2, None).await;

    create_role(&app, &token, "editor", "Editor").await;
    create_role(&app, &token, "gestor", "Gestor").await;
    assert_eq!(
        put_permissions(&app, &token, "editor", &[("DASH", "VIEW")]).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        put_permissions(&app, &token, "gestor", &[("ADMIN", "VIEW")]).await,
        StatusCode::NO_CONTENT
    );

    assign_roles(&app, &token, &user_id, &["editor", "gestor"]).await;
    assert_eq!(
        fetch_menu_ids(&app, &token, &user_id).await,
        vec!["DASH", "ADMIN"]
    );

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/users/{}/roles", user_id),
            &token,
            serde_json::json!({ "roleNames": ["gestor"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(fetch_menu_ids(&app, &token, &user_id).await, vec!["DASH"]);
}
