//! Application state and router assembly.

use crate::auth;
use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::response::ApiResponse;
use crate::routes;
use crate::storage::{FsImageStore, ImageStore};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware, routing,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Request body cap. Image uploads are the largest accepted payloads.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// State with the filesystem image store rooted at the configured
    /// upload directory.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let images = Arc::new(FsImageStore::new(&config.upload_dir, "/uploads"));
        Self {
            db,
            config: Arc::new(config),
            images,
        }
    }
}

async fn healthz_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    state.db.ping().await?;
    Ok(Json(ApiResponse::success(json!({ "status": "ok" }))))
}

/// Assemble the full application router: resource routers under `/api`,
/// interactive docs at `/docs`, uploaded files served at `/uploads`.
pub fn build_router(state: AppState) -> Router {
    let (api, docs) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/cars", routes::cars::router())
        .nest("/parts", routes::parts::router())
        .nest("/suppliers", routes::suppliers::router())
        .nest("/customers", routes::customers::router())
        .nest("/sales", routes::sales::router())
        .nest("/uploads", routes::uploads::router())
        .nest("/dashboard", routes::dashboard::router())
        .split_for_parts();

    Router::new()
        .nest("/api", api)
        .route("/api/healthz", routing::get(healthz_handler))
        .merge(Scalar::with_url("/docs", docs))
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
