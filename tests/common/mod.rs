use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use partstock::migrations::Migrator;
use partstock::{AppConfig, AppState, build_router};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        upload_dir: std::env::temp_dir()
            .join(format!("partstock-test-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        api_token: None,
    }
}

pub async fn setup_test_app() -> Router {
    let db = setup_test_db().await.expect("Failed to setup test database");
    build_router(AppState::new(db, test_config()))
}

/// Like [`setup_test_app`] but hands back the config so tests can look at
/// the upload directory.
#[allow(dead_code)]
pub async fn setup_test_app_with_config() -> (Router, AppConfig) {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let config = test_config();
    let app = build_router(AppState::new(db, config.clone()));
    (app, config)
}

#[allow(dead_code)]
pub async fn setup_test_app_with_token(token: &str) -> Router {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let mut config = test_config();
    config.api_token = Some(token.to_string());
    build_router(AppState::new(db, config))
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, payload: &Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn put_json(app: &Router, uri: &str, payload: &Value) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a payload and return the `data` object of the created resource.
#[allow(dead_code)]
pub async fn create_ok(app: &Router, uri: &str, payload: &Value) -> Value {
    let response = post_json(app, uri, payload).await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "create on {uri} failed"
    );
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    body["data"].clone()
}
