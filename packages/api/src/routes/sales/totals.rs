use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;

use super::SalesFilter;
use crate::entity::sales_record;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub total_quantity: f64,
    pub total_revenue: f64,
    pub total_records: i64,
}

/// GET /sales/totals - summed quantity/revenue and record count over
/// the matching set. An empty match is an all-zero result, not an
/// error (`SUM` over nothing is `NULL` and maps to zero here).
#[tracing::instrument(name = "GET /sales/totals", skip(state))]
pub async fn get_totals(
    State(state): State<AppState>,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<TotalsResponse>, ApiError> {
    let sums: Option<(Option<f64>, Option<f64>, i64)> = sales_record::Entity::find()
        .filter(filter.to_condition())
        .select_only()
        .column_as(sales_record::Column::Quantity.sum(), "total_quantity")
        .column_as(sales_record::Column::Revenue.sum(), "total_revenue")
        .column_as(sales_record::Column::Id.count(), "total_records")
        .into_tuple()
        .one(&state.db)
        .await?;

    let (quantity, revenue, records) = sums.unwrap_or((None, None, 0));

    Ok(Json(TotalsResponse {
        total_quantity: quantity.unwrap_or(0.0),
        total_revenue: revenue.unwrap_or(0.0),
        total_records: records,
    }))
}
