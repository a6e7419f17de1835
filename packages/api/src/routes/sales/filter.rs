use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::SalesFilter;
use crate::entity::sales_record;
use crate::error::ApiError;
use crate::state::AppState;

/// Hard cap on the response size; callers needing more narrow the
/// filter, there is no pagination cursor.
const MAX_RESULTS: u64 = 1000;

/// GET /sales/filter - matching records, newest date first.
#[tracing::instrument(name = "GET /sales/filter", skip(state))]
pub async fn filter_sales(
    State(state): State<AppState>,
    Query(filter): Query<SalesFilter>,
) -> Result<Json<Vec<sales_record::Model>>, ApiError> {
    let records = sales_record::Entity::find()
        .filter(filter.to_condition())
        .order_by_desc(sales_record::Column::Date)
        .limit(MAX_RESULTS)
        .all(&state.db)
        .await?;

    Ok(Json(records))
}
