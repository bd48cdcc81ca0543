//! Customer endpoints.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::customer::{Column, Customer, CustomerCreate, CustomerUpdate};
use crate::pagination::{self, Paginated};
use crate::response::ApiResponse;
use crate::traits::CrudResource;
use crate::validation::{validate_customer_create, validate_customer_update};
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
pub struct CustomerListParams {
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

fn list_condition(params: &CustomerListParams) -> Condition {
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
    params(CustomerListParams),
    responses(
        (status = 200, description = "A page of customers", body = ApiResponse<Paginated<Customer>>)
    ),
    operation_id = "get_all_customers",
    summary = "List customers",
    tag = "customers"
)]
pub async fn get_all_handler(
    Query(params): Query<CustomerListParams>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Paginated<Customer>>>, ApiError> {
    let condition = list_condition(&params);
    let (page, limit) = pagination::clamp(params.page, params.limit);
    let order_by = sort::resolve(
        params.sort.as_deref(),
        params.order.as_deref(),
        Customer::sortable_columns(),
        Customer::default_sort(),
    );

    let total = Customer::total_count(&state.db, condition.clone()).await?;
    let items = Customer::get_all(
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
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The requested customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found")
    ),
    operation_id = "get_one_customer",
    summary = "Get one customer",
    tag = "customers"
)]
pub async fn get_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = Customer::get_one(&state.db, id).await?;
    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CustomerCreate,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<Customer>),
        (status = 400, description = "Validation failed")
    ),
    operation_id = "create_one_customer",
    summary = "Create a customer",
    tag = "customers"
)]
pub async fn create_one_handler(
    State(state): State<AppState>,
    Json(payload): Json<CustomerCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), ApiError> {
    validate_customer_create(&payload)?;
    let customer = Customer::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(customer))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = CustomerUpdate,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<Customer>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Customer not found")
    ),
    operation_id = "update_one_customer",
    summary = "Update a customer",
    tag = "customers"
)]
pub async fn update_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerUpdate>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    validate_customer_update(&payload)?;
    let customer = Customer::update(&state.db, id, payload).await?;
    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted, body carries the id", body = ApiResponse<Uuid>),
        (status = 404, description = "Customer not found")
    ),
    operation_id = "delete_one_customer",
    summary = "Delete a customer",
    description = "Deletes a customer. Past sales keep existing with the reference cleared.",
    tag = "customers"
)]
pub async fn delete_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let deleted = Customer::delete(&state.db, id).await?;
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
