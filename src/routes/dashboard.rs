//! Aggregated inventory statistics for the dashboard page.

use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::part::{self, PartStatus};
use crate::models::{car, customer, sale, supplier};
use crate::response::ApiResponse;
use axum::{Json, extract::State};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect,
};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub cars: u64,
    pub parts: u64,
    pub suppliers: u64,
    pub customers: u64,
    pub sales: u64,
    pub parts_by_status: PartsByStatus,
    /// Sum of all sale prices.
    pub total_revenue: Decimal,
}

#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartsByStatus {
    pub available: u64,
    pub reserved: u64,
    pub sold: u64,
    pub scrapped: u64,
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: PartStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct RevenueRow {
    revenue: Option<Decimal>,
}

async fn parts_by_status(db: &DatabaseConnection) -> Result<PartsByStatus, ApiError> {
    let rows = part::Entity::find()
        .select_only()
        .column(part::Column::Status)
        .column_as(part::Column::Id.count(), "count")
        .group_by(part::Column::Status)
        .into_model::<StatusCount>()
        .all(db)
        .await?;

    let mut by_status = PartsByStatus::default();
    for row in rows {
        let count = u64::try_from(row.count).unwrap_or_default();
        match row.status {
            PartStatus::Available => by_status.available = count,
            PartStatus::Reserved => by_status.reserved = count,
            PartStatus::Sold => by_status.sold = count,
            PartStatus::Scrapped => by_status.scrapped = count,
        }
    }
    Ok(by_status)
}

async fn total_revenue(db: &DatabaseConnection) -> Result<Decimal, ApiError> {
    let row = sale::Entity::find()
        .select_only()
        .column_as(sale::Column::Price.sum(), "revenue")
        .into_model::<RevenueRow>()
        .one(db)
        .await?;
    Ok(row.and_then(|row| row.revenue).unwrap_or_default())
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Inventory statistics", body = ApiResponse<DashboardStats>)
    ),
    operation_id = "get_dashboard_stats",
    summary = "Dashboard statistics",
    description = "Record counts, part counts per status, and total sales revenue.",
    tag = "dashboard"
)]
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let db = &state.db;
    let stats = DashboardStats {
        cars: car::Entity::find().count(db).await?,
        parts: part::Entity::find().count(db).await?,
        suppliers: supplier::Entity::find().count(db).await?,
        customers: customer::Entity::find().count(db).await?,
        sales: sale::Entity::find().count(db).await?,
        parts_by_status: parts_by_status(db).await?,
        total_revenue: total_revenue(db).await?,
    };
    Ok(Json(ApiResponse::success(stats)))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(stats_handler))
}
