//! Donor car endpoints.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::car::{BodyType, Car, CarCreate, CarUpdate, Column, FuelType};
use crate::models::part::{self, Part};
use crate::pagination::{self, Paginated};
use crate::response::ApiResponse;
use crate::traits::CrudResource;
use crate::validation::{validate_car_create, validate_car_update};
use crate::{filter, sort};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CarListParams {
    /// Case-insensitive substring over brand, model, VIN and description.
    pub q: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub body_type: Option<BodyType>,
    pub fuel_type: Option<FuelType>,
    pub min_mileage: Option<i32>,
    pub max_mileage: Option<i32>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Page size, clamped to 1..=100 (default 20).
    pub limit: Option<u64>,
    /// Sortable: brand, model, year, mileage, createdAt, updatedAt.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

fn list_condition(params: &CarListParams) -> Condition {
    let mut condition = Condition::all();
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        condition = condition.add(filter::any_contains_ci(
            &[Column::Brand, Column::Model, Column::Vin, Column::Description],
            q,
        ));
    }
    if let Some(brand) = params.brand.as_deref() {
        condition = condition.add(filter::contains_ci(Column::Brand, brand));
    }
    if let Some(model) = params.model.as_deref() {
        condition = condition.add(filter::contains_ci(Column::Model, model));
    }
    if let Some(year) = params.year {
        condition = condition.add(Column::Year.eq(year));
    }
    if let Some(body_type) = params.body_type {
        condition = condition.add(Column::BodyType.eq(body_type));
    }
    if let Some(fuel_type) = params.fuel_type {
        condition = condition.add(Column::FuelType.eq(fuel_type));
    }
    if let Some(min) = params.min_mileage {
        condition = condition.add(Column::Mileage.gte(min));
    }
    if let Some(max) = params.max_mileage {
        condition = condition.add(Column::Mileage.lte(max));
    }
    condition
}

#[utoipa::path(
    get,
    path = "/",
    params(CarListParams),
    responses(
        (status = 200, description = "A page of cars", body = ApiResponse<Paginated<Car>>)
    ),
    operation_id = "get_all_cars",
    summary = "List cars",
    description = "Retrieves a page of donor cars, filtered and sorted by query parameters.",
    tag = "cars"
)]
pub async fn get_all_handler(
    Query(params): Query<CarListParams>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Paginated<Car>>>, ApiError> {
    let condition = list_condition(&params);
    let (page, limit) = pagination::clamp(params.page, params.limit);
    let order_by = sort::resolve(
        params.sort.as_deref(),
        params.order.as_deref(),
        Car::sortable_columns(),
        Car::default_sort(),
    );

    let total = Car::total_count(&state.db, condition.clone()).await?;
    let items = Car::get_all(
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
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "The requested car", body = ApiResponse<Car>),
        (status = 404, description = "Car not found")
    ),
    operation_id = "get_one_car",
    summary = "Get one car",
    tag = "cars"
)]
pub async fn get_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Car>>, ApiError> {
    let car = Car::get_one(&state.db, id).await?;
    Ok(Json(ApiResponse::success(car)))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CarCreate,
    responses(
        (status = 201, description = "Car created", body = ApiResponse<Car>),
        (status = 400, description = "Validation failed or duplicate VIN")
    ),
    operation_id = "create_one_car",
    summary = "Create a car",
    tag = "cars"
)]
pub async fn create_one_handler(
    State(state): State<AppState>,
    Json(payload): Json<CarCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Car>>), ApiError> {
    validate_car_create(&payload)?;
    let car = Car::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(car))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Car id")),
    request_body = CarUpdate,
    responses(
        (status = 200, description = "Car updated", body = ApiResponse<Car>),
        (status = 400, description = "Validation failed or duplicate VIN"),
        (status = 404, description = "Car not found")
    ),
    operation_id = "update_one_car",
    summary = "Update a car",
    tag = "cars"
)]
pub async fn update_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarUpdate>,
) -> Result<Json<ApiResponse<Car>>, ApiError> {
    validate_car_update(&payload)?;
    let car = Car::update(&state.db, id, payload).await?;
    Ok(Json(ApiResponse::success(car)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car deleted, body carries the id", body = ApiResponse<Uuid>),
        (status = 400, description = "Parts still reference the car"),
        (status = 404, description = "Car not found")
    ),
    operation_id = "delete_one_car",
    summary = "Delete a car",
    tag = "cars"
)]
pub async fn delete_one_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let deleted = Car::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

#[utoipa::path(
    get,
    path = "/{id}/parts",
    params(("id" = Uuid, Path, description = "Car id")),
    responses(
        (status = 200, description = "Parts harvested from this car", body = ApiResponse<Vec<Part>>),
        (status = 404, description = "Car not found")
    ),
    operation_id = "get_car_parts",
    summary = "List parts of a car",
    tag = "cars"
)]
pub async fn get_parts_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Part>>>, ApiError> {
    // 404 for unknown cars rather than an empty list.
    Car::get_one(&state.db, id).await?;

    let parts = part::Entity::find()
        .filter(part::Column::CarId.eq(id))
        .order_by_asc(part::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(Part::from)
        .collect();
    Ok(Json(ApiResponse::success(parts)))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_all_handler))
        .routes(routes!(get_one_handler))
        .routes(routes!(create_one_handler))
        .routes(routes!(update_one_handler))
        .routes(routes!(delete_one_handler))
        .routes(routes!(get_parts_handler))
}
