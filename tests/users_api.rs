// tests/users_api.rs

mod common;

use axum::http::StatusCode;
use common::{get_request, json_request, read_json, seed_user, test_app};
use tower::ServiceExt;

#[tokio::test]
async fn user_crud_roundtrip() {
    let (app, state) = test_app().await;
    let (_, token) = seed_user(&state, "admin").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            &token,
            serde_json::json!({
                "userName": "joao.santos",
                "password": "senha-forte",
                "email": "joao.santos@example.com",
                "firstName": "João",
                "lastName": "Santos",
                "phoneNumber": "+55 11 99999-0000",
                "dob": "1988-11-02",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    let user_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["userName"], "joao.santos");
    // O hash de senha jamais aparece na resposta
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", user_id),
            &token,
            serde_json::json!({
                "firstName": "João Pedro",
                "lastName": "Santos",
                "dob": "1988-11-02",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{}", user_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["firstName"], "João Pedro");

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/users/filter?filter=joao&pageIndex=1&pageSize=10",
            &token,
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["totalRecords"], 1);
    assert_eq!(body["items"][0]["userName"], "joao.santos");

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/users/{}", user_id),
            &token,
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{}", user_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicated_user_name_is_a_conflict() {
    let (app, state) = test_app().await;
    let (_, token) = seed_user(&state, "admin").await;

    let payload = serde_json::json!({
        "userName": "ana",
        "password": "senha-123",
        "email": "ana@example.com",
        "firstName": "Ana",
        "lastName": "Souza",
        "dob": "1990-03-14",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", &token, payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", &token, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_payload_is_rejected_with_details() {
    let (app, state) = test_app().await;
    let (_, token) = seed_user(&state, "admin").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            &token,
            serde_json::json!({
                "userName": "x",
                "password": "123",
                "email": "nao-e-email",
                "firstName": "",
                "lastName": "Souza",
                "dob": "1990-03-14",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["details"].is_object());
}

#[tokio::test]
async fn login_issues_a_working_token() {
    let (app, state) = test_app().await;
    seed_user(&state, "ana").await;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({ "userName": "ana", "password": "senha-123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request("/api/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["userName"], "ana");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, state) = test_app().await;
    seed_user(&state, "ana").await;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({ "userName": "ana", "password": "senha-errada" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let (app, state) = test_app().await;
    let (user_id, token) = seed_user(&state, "ana").await;

    // Senha atual errada
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}/change-password", user_id),
            &token,
            serde_json::json!({ "currentPassword": "errada", "newPassword": "senha-nova" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Senha atual correta
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}/change-password", user_id),
            &token,
            serde_json::json!({ "currentPassword": "senha-123", "newPassword": "senha-nova" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Só a senha nova passa no login agora
    let login = |password: &str| {
        serde_json::json!({ "userName": "ana", "password": password }).to_string()
    };

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(login("senha-123")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(login("senha-nova")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_reject_requests_without_token() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/users")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Saúde e documentação continuam públicas
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api-docs/openapi.json")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn token_of_a_deleted_user_stops_working() {
    let (app, state) = test_app().await;
    let (_, admin_token) = seed_user(&state, "admin").await;
    let (user_id, user_token) = seed_user(&state, "ana").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/users/{}", user_id),
            &admin_token,
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/auth/me", &user_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
