//! Sale endpoints.
//!
//! Creating a sale marks the sold part `sold`; deleting the sale cancels it
//! and puts the part back on the shelf. Both transitions run inside a
//! transaction in the model layer.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::sale::{Column, Sale, SaleCreate, SaleUpdate};
use crate::pagination::{self, Paginated};
use crate::response::ApiResponse;
use crate::sort;
use crate::traits::CrudResource;
use crate::validation::{validate_sale_create, validate_sale_update};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SaleListParams {
    pub part_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    /// Lower bound (inclusive) on `soldAt`, RFC 3339.
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (inclusive) on `soldAt`, RFC 3339.
    pub to: Option<DateTime<Utc>>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size, clamped to 1..=100 (default 20).
    pub limit: Option<u64>,
    /// Sortable: soldAt, price, createdAt.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

fn list_condition(params: &SaleListParams) -> Condition {
    let mut condition = Condition::all();
    if let Some(part_id) = params.part_id {
        condition = condition.add(Column::PartId.eq(part_id));
    }
    if let Some(customer_id) = params.customer_id {
        condition = condition.add(Column::CustomerId.eq(customer_id));
    }
    if let Some(from) = params.from {
        condition = condition.add(Column::SoldAt.gte(from));
    }
    if let Some(to) = params.to {
        condition = condition.add(Column::SoldAt.lte(to));
    }
    condition
}

#[utoipa::path(
    get,
    path = "/",
    params(SaleListParams),
    responses(
        (status = 200, description = "A page of sales", body = ApiResponse<Paginated<Sale>>)
    ),
    operation_id = "get_all_sales",
    summary = "List sales",
    tag = "sales"
)]
pub async fn get_all_handler(
    Query(params): Query<SaleListParams>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Paginated<Sale>>>, ApiError> {
    let condition = list_condition(&params);
    let (page, limit) = pagination::clamp(params.page, params.limit);
    let order_by = sort::resolve(
        params.sort.as_deref(),
        params.order.as_deref(),
        Sale::sortable_columns(),
        Sale::default_sort(),
    );

    let total = Sale::total_count(&state.db, condition.clone()).await?;
    let items = Sale::get_all(
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
    params(("id" = Uuid, Path, description = "Sale id")),
    responses(
        (status = 200, description = "The requested sale", body = ApiResponse<Sale>),
        (status = 404, description = "Sale not found")
    ),
    operation_id = "get_one_sale",
    summary = "Get one sale",
    tag = "sales"
)]
pub async fn get_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Sale>>, ApiError> {
    let sale = Sale::get_one(&state.db, id).await?;
    Ok(Json(ApiResponse::success(sale)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = SaleCreate,
    responses(
        (status = 201, description = "Sale recorded, part marked sold", body = ApiResponse<Sale>),
        (status = 400, description = "Validation failed, unknown part, or part not sellable")
    ),
    operation_id = "create_one_sale",
    summary = "Record a sale",
    tag = "sales"
)]
pub async fn create_one_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaleCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Sale>>), ApiError> {
    validate_sale_create(&payload)?;
    let sale = Sale::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(sale))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Sale id")),
    request_body = SaleUpdate,
    responses(
        (status = 200, description = "Sale updated", body = ApiResponse<Sale>),
        (status = 400, description = "Validation failed or unknown customer"),
        (status = 404, description = "Sale not found")
    ),
    operation_id = "update_one_sale",
    summary = "Update a sale",
    description = "Adjusts price, customer, sale time or notes. The sold part cannot be changed.",
    tag = "sales"
)]
pub async fn update_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaleUpdate>,
) -> Result<Json<ApiResponse<Sale>>, ApiError> {
    validate_sale_update(&payload)?;
    let sale = Sale::update(&state.db, id, payload).await?;
    Ok(Json(ApiResponse::success(sale)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale cancelled, part restored to available", body = ApiResponse<Uuid>),
        (status = 404, description = "Sale not found")
    ),
    operation_id = "delete_one_sale",
    summary = "Cancel a sale",
    tag = "sales"
)]
pub async fn delete_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let deleted = Sale::delete(&state.db, id).await?;
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
