//! HTTP contract tests for the customer endpoints, run against a scripted repository.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use std::sync::Arc;
use tower::ServiceExt;

use customer_service::api::create_router;
use customer_service::app::AppState;
use customer_service::domain::{CustomerError, DatabaseError};
use customer_service::infra::JwtTokenIssuer;
use customer_service::test_utils::{MockCustomerRepository, MockCustomerStore, sample_customer};

fn issuer() -> Arc<JwtTokenIssuer> {
    Arc::new(JwtTokenIssuer::new(
        SecretString::from("contract-secret".to_string()),
        "customer-service",
    ))
}

fn router_with(repo: Arc<MockCustomerRepository>) -> Router {
    let state = AppState::with_repository(repo, issuer(), Arc::new(MockCustomerStore::new()));
    create_router(Arc::new(state))
}

fn post_customers(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_customers_invalid_cpf_format() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    let response = router
        .oneshot(get("/customers?cpf=invalid_cpf_format"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(repo.find_calls(), 0);
}

#[tokio::test]
async fn test_list_customers_lookup_error_still_returns_token() {
    let repo = Arc::new(
        MockCustomerRepository::new()
            .with_find_error(DatabaseError::Query("some error".to_string())),
    );
    let router = router_with(Arc::clone(&repo));

    let response = router
        .oneshot(get("/customers?cpf=12345678900"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let claims = issuer().verify_token(body.as_str().unwrap()).unwrap();
    assert!(claims.is_anonymous());
    assert_eq!(repo.find_calls(), 1);
}

#[tokio::test]
async fn test_list_customers_known_cpf() {
    let repo = Arc::new(MockCustomerRepository::new().with_customer(sample_customer()));
    let router = router_with(Arc::clone(&repo));

    let response = router
        .oneshot(get("/customers?cpf=12345678900"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let claims = issuer().verify_token(body.as_str().unwrap()).unwrap();
    assert_eq!(claims.customer_id.as_deref(), Some("1"));
    assert_eq!(repo.last_cpf().as_deref(), Some("12345678900"));
}

#[tokio::test]
async fn test_list_customers_without_cpf_skips_lookup() {
    let repo = Arc::new(MockCustomerRepository::new().with_customer(sample_customer()));
    let router = router_with(Arc::clone(&repo));

    let response = router.oneshot(get("/customers")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let claims = issuer().verify_token(body.as_str().unwrap()).unwrap();
    assert!(claims.is_anonymous());
    assert_eq!(repo.find_calls(), 0);
}

#[tokio::test]
async fn test_list_customers_empty_cpf_skips_lookup() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    let response = router.oneshot(get("/customers?cpf=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.find_calls(), 0);
}

#[tokio::test]
async fn test_create_customer_wrong_field_type() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    // cpf sent as a number
    let response = router
        .oneshot(post_customers(
            r#"{"name":"New Customer", "cpf":12345678900, "email":"newcustomer@email.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("invalid type"));
    assert_eq!(repo.create_calls(), 0);
}

#[tokio::test]
async fn test_create_customer_syntax_error_and_missing_field() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    for payload in [r#"{"name":"#, r#"{"name":"Customer 1","cpf":"12345678900"}"#] {
        let response = router
            .clone()
            .oneshot(post_customers(payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(body_json(response).await["error"].is_string());
    }
    assert_eq!(repo.create_calls(), 0);
}

#[tokio::test]
async fn test_create_customer_without_json_content_type() {
    let router = router_with(Arc::new(MockCustomerRepository::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/customers")
        .body(Body::from(
            r#"{"name":"Customer 1","cpf":"12345678900","email":"email@email.com"}"#,
        ))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_create_customer_invalid_input() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    let response = router
        .oneshot(post_customers(
            r#"{"name":"","cpf":"12345678900","email":"invalid-email"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("email"));
    assert_eq!(repo.create_calls(), 0);
}

#[tokio::test]
async fn test_create_customer_use_case_error() {
    let repo = Arc::new(MockCustomerRepository::new().with_create_error(CustomerError::UnknownCreation));
    let router = router_with(repo);

    let response = router
        .oneshot(post_customers(
            r#"{"name":"New Customer","cpf":"12345678900","email":"newcustomer@email.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "an unknown error occurred while creating the customer"
    );
}

#[tokio::test]
async fn test_create_customer() {
    let repo = Arc::new(MockCustomerRepository::new());
    let router = router_with(Arc::clone(&repo));

    let response = router
        .oneshot(post_customers(
            r#"{"name":"Customer 1","cpf":"12345678900","email":"email@email.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "id": 1,
            "name": "Customer 1",
            "cpf": "12345678900",
            "email": "email@email.com",
            "createdAt": "2021-01-01T00:00:00Z",
        })
    );
    assert_eq!(repo.create_calls(), 1);
}
