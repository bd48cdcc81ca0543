//! Supplier endpoints.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::supplier::{Column, Supplier, SupplierCreate, SupplierUpdate};
use crate::pagination::{self, Paginated};
use crate::response::ApiResponse;
use crate::traits::CrudResource;
use crate::validation::{validate_supplier_create, validate_supplier_update};
use crate::{filter, sort};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::Condition;
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SupplierListParams {
    /// Case-insensitive substring over name, phone, email and address.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size, clamped to 1..=100 (default 20).
    pub limit: Option<u64>,
    /// Sortable: name, createdAt, updatedAt.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

fn list_condition(params: &SupplierListParams) -> Condition {
    let mut condition = Condition::all();
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        condition = condition.add(filter::any_contains_ci(
            &[Column::Name, Column::Phone, Column::Email, Column::Address],
            q,
        ));
    }
    condition
}

#[utoipa::path(
    get,
    path = "/",
    params(SupplierListParams),
    responses(
        (status = 200, description = "A page of suppliers", body = ApiResponse<Paginated<Supplier>>)
    ),
    operation_id = "get_all_suppliers",
    summary = "List suppliers",
    tag = "suppliers"
)]
pub async fn get_all_handler(
    Query(params): Query<SupplierListParams>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Paginated<Supplier>>>, ApiError> {
    let condition = list_condition(&params);
    let (page, limit) = pagination::clamp(params.page, params.limit);
    let order_by = sort::resolve(
        params.sort.as_deref(),
        params.order.as_deref(),
        Supplier::sortable_columns(),
        Supplier::default_sort(),
    );

    let total = Supplier::total_count(&state.db, condition.clone()).await?;
    let items = Supplier::get_all(
        &state.db,
        condition,
        order_by,
        pagination::offset(page, limit),
        limit,
    )
    .await?;

    Ok(Json(ApiResponse::success(Paginated::new(
        items, total, page, limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "The requested supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Supplier not found")
    ),
    operation_id = "get_one_supplier",
    summary = "Get one supplier",
    tag = "suppliers"
)]
pub async fn get_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Supplier>>, ApiError> {
    let supplier = Supplier::get_one(&state.db, id).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = SupplierCreate,
    responses(
        (status = 201, description = "Supplier created", body = ApiResponse<Supplier>),
        (status = 400, description = "Validation failed")
    ),
    operation_id = "create_one_supplier",
    summary = "Create a supplier",
    tag = "suppliers"
)]
pub async fn create_one_handler(
    State(state): State<AppState>,
    Json(payload): Json<SupplierCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Supplier>>), ApiError> {
    validate_supplier_create(&payload)?;
    let supplier = Supplier::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(supplier))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Supplier id")),
    request_body = SupplierUpdate,
    responses(
        (status = 200, description = "Supplier updated", body = ApiResponse<Supplier>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Supplier not found")
    ),
    operation_id = "update_one_supplier",
    summary = "Update a supplier",
    tag = "suppliers"
)]
pub async fn update_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierUpdate>,
) -> Result<Json<ApiResponse<Supplier>>, ApiError> {
    validate_supplier_update(&payload)?;
    let supplier = Supplier::update(&state.db, id, payload).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier deleted, body carries the id", body = ApiResponse<Uuid>),
        (status = 404, description = "Supplier not found")
    ),
    operation_id = "delete_one_supplier",
    summary = "Delete a supplier",
    description = "Deletes a supplier. Parts bought from it keep existing with the reference cleared.",
    tag = "suppliers"
)]
pub async fn delete_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let deleted = Supplier::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all_handler))
        .routes(routes!(get_one_handler))
        .routes(routes!(create_one_handler))
        .routes(routes!(update_one_handler))
        .routes(routes!(delete_one_handler))
}
