//! Part endpoints, including the name suggestion helper used by entry forms.

use crate::app::AppState;
use crate::catalog;
use crate::errors::ApiError;
use crate::models::part::{
    Column, Part, PartCategory, PartCondition, PartCreate, PartStatus, PartUpdate,
};
use crate::pagination::{self, Paginated};
use crate::response::ApiResponse;
use crate::traits::CrudResource;
use crate::validation::{validate_part_create, validate_part_update};
use crate::{filter, sort};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PartListParams {
    /// Case-insensitive substring over name, location and notes.
    pub q: Option<String>,
    pub category: Option<PartCategory>,
    pub status: Option<PartStatus>,
    pub condition: Option<PartCondition>,
    pub car_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size, clamped to 1..=100 (default 20).
    pub limit: Option<u64>,
    /// Sortable: name, category, condition, status, price, purchaseDate,
    /// createdAt, updatedAt.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

fn list_condition(params: &PartListParams) -> Condition {
    let mut condition = Condition::all();
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        condition = condition.add(filter::any_contains_ci(
            &[Column::Name, Column::Location, Column::Notes],
            q,
        ));
    }
    if let Some(category) = params.category {
        condition = condition.add(Column::Category.eq(category));
    }
    if let Some(status) = params.status {
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(part_condition) = params.condition {
        condition = condition.add(Column::Condition.eq(part_condition));
    }
    if let Some(car_id) = params.car_id {
        condition = condition.add(Column::CarId.eq(car_id));
    }
    if let Some(supplier_id) = params.supplier_id {
        condition = condition.add(Column::SupplierId.eq(supplier_id));
    }
    if let Some(min) = params.min_price {
        condition = condition.add(Column::Price.gte(min));
    }
    if let Some(max) = params.max_price {
        condition = condition.add(Column::Price.lte(max));
    }
    condition
}

#[utoipa::path(
    get,
    path = "/",
    params(PartListParams),
    responses(
        (status = 200, description = "A page of parts", body = ApiResponse<Paginated<Part>>)
    ),
    operation_id = "get_all_parts",
    summary = "List parts",
    description = "Retrieves a page of parts, filtered and sorted by query parameters.",
    tag = "parts"
)]
pub async fn get_all_handler(
    Query(params): Query<PartListParams>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Paginated<Part>>>, ApiError> {
    let condition = list_condition(&params);
    let (page, limit) = pagination::clamp(params.page, params.limit);
    let order_by = sort::resolve(
        params.sort.as_deref(),
        params.order.as_deref(),
        Part::sortable_columns(),
        Part::default_sort(),
    );

    let total = Part::total_count(&state.db, condition.clone()).await?;
    let items = Part::get_all(
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

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionParams {
    /// Substring to match against the catalogue of common part names.
    pub q: Option<String>,
    /// Maximum number of suggestions (default 10).
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/suggestions",
    params(SuggestionParams),
    responses(
        (status = 200, description = "Matching part names", body = ApiResponse<Vec<String>>)
    ),
    operation_id = "get_part_suggestions",
    summary = "Suggest part names",
    description = "Case-insensitive substring search over a catalogue of common part names.",
    tag = "parts"
)]
pub async fn suggestions_handler(
    Query(params): Query<SuggestionParams>,
) -> Json<ApiResponse<Vec<String>>> {
    let limit = params.limit.unwrap_or(10).min(50);
    let names = catalog::suggest(params.q.as_deref().unwrap_or_default(), limit);
    Json(ApiResponse::success(names))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    responses(
        (status = 200, description = "The requested part", body = ApiResponse<Part>),
        (status = 404, description = "Part not found")
    ),
    operation_id = "get_one_part",
    summary = "Get one part",
    tag = "parts"
)]
pub async fn get_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let part = Part::get_one(&state.db, id).await?;
    Ok(Json(ApiResponse::success(part)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = PartCreate,
    responses(
        (status = 201, description = "Part created", body = ApiResponse<Part>),
        (status = 400, description = "Validation failed or dangling reference")
    ),
    operation_id = "create_one_part",
    summary = "Create a part",
    description = "Creates a part. When `category` is omitted it is inferred from the name.",
    tag = "parts"
)]
pub async fn create_one_handler(
    State(state): State<AppState>,
    Json(payload): Json<PartCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Part>>), ApiError> {
    validate_part_create(&payload)?;
    let part = Part::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(part))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    request_body = PartUpdate,
    responses(
        (status = 200, description = "Part updated", body = ApiResponse<Part>),
        (status = 400, description = "Validation failed or dangling reference"),
        (status = 404, description = "Part not found")
    ),
    operation_id = "update_one_part",
    summary = "Update a part",
    tag = "parts"
)]
pub async fn update_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PartUpdate>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    validate_part_update(&payload)?;
    let part = Part::update(&state.db, id, payload).await?;
    Ok(Json(ApiResponse::success(part)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Part id")),
    responses(
        (status = 200, description = "Part deleted, body carries the id", body = ApiResponse<Uuid>),
        (status = 400, description = "Sales still reference the part"),
        (status = 404, description = "Part not found")
    ),
    operation_id = "delete_one_part",
    summary = "Delete a part",
    tag = "parts"
)]
pub async fn delete_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let deleted = Part::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all_handler))
        .routes(routes!(suggestions_handler))
        .routes(routes!(get_one_handler))
        .routes(routes!(create_one_handler))
        .routes(routes!(update_one_handler))
        .routes(routes!(delete_one_handler))
}
