use axum::{Json, extract::State};
use sea_orm::{EntityTrait, QuerySelect};
use serde::Serialize;

use crate::entity::sales_record;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub products: Vec<String>,
}

/// GET /sales/meta - distinct label values, alphabetically sorted,
/// independent of any filter. Feeds the dashboard's selection
/// controls.
#[tracing::instrument(name = "GET /sales/meta", skip(state))]
pub async fn get_metadata(
    State(state): State<AppState>,
) -> Result<Json<MetaResponse>, ApiError> {
    let categories = distinct_values(&state, sales_record::Column::Category).await?;
    let regions = distinct_values(&state, sales_record::Column::Region).await?;
    let products = distinct_values(&state, sales_record::Column::Product).await?;

    Ok(Json(MetaResponse {
        categories,
        regions,
        products,
    }))
}

async fn distinct_values(
    state: &AppState,
    column: sales_record::Column,
) -> Result<Vec<String>, ApiError> {
    let mut values: Vec<String> = sales_record::Entity::find()
        .select_only()
        .column(column)
        .distinct()
        .into_tuple()
        .all(&state.db)
        .await?;
    values.sort();
    Ok(values)
}
