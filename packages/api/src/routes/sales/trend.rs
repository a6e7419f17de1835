use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::entity::sales_record;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// `monthly` (the default) or `daily`; any other value groups
    /// daily.
    #[serde(rename = "type")]
    pub granularity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub revenue: f64,
    pub quantity: f64,
}

/// GET /sales/trend - revenue and quantity summed per day or month,
/// buckets ascending.
///
/// The monthly bucket key is the first 7 characters of the stored date
/// (`YYYY-MM`) — a plain substring, not calendar arithmetic, which
/// holds only because dates are stored as zero-padded ISO strings.
#[tracing::instrument(name = "GET /sales/trend", skip(state))]
pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let monthly = matches!(query.granularity.as_deref(), None | Some("monthly"));

    let rows: Vec<(String, f64, f64)> = sales_record::Entity::find()
        .select_only()
        .columns([
            sales_record::Column::Date,
            sales_record::Column::Revenue,
            sales_record::Column::Quantity,
        ])
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut buckets: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for (date, revenue, quantity) in rows {
        let key = if monthly {
            date.chars().take(7).collect()
        } else {
            date
        };
        let bucket = buckets.entry(key).or_insert((0.0, 0.0));
        bucket.0 += revenue;
        bucket.1 += quantity;
    }

    let points = buckets
        .into_iter()
        .map(|(date, (revenue, quantity))| TrendPoint {
            date,
            revenue,
            quantity,
        })
        .collect();

    Ok(Json(points))
}
