use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;

use crate::entity::sales_record;
use crate::state::AppState;

pub mod filter;
pub mod meta;
pub mod totals;
pub mod trend;
pub mod upload;

/// Uploads above this size are rejected before any parsing work.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload::upload_sales_data).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/totals", get(totals::get_totals))
        .route("/filter", get(filter::filter_sales))
        .route("/trend", get(trend::get_trend))
        .route("/meta", get(meta::get_metadata))
}

/// Optional narrowing applied to the read operations.
///
/// `start`/`end` are inclusive bounds compared against the textual
/// `date` column, which orders chronologically because the stored
/// format is zero-padded ISO. The range only takes effect when both
/// bounds are present; empty parameters count as absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SalesFilter {
    pub product: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl SalesFilter {
    pub fn to_condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(product) = present(&self.product) {
            condition = condition.add(sales_record::Column::Product.eq(product));
        }
        if let Some(category) = present(&self.category) {
            condition = condition.add(sales_record::Column::Category.eq(category));
        }
        if let Some(region) = present(&self.region) {
            condition = condition.add(sales_record::Column::Region.eq(region));
        }
        if let (Some(start), Some(end)) = (present(&self.start), present(&self.end)) {
            condition = condition
                .add(sales_record::Column::Date.gte(start))
                .add(sales_record::Column::Date.lte(end));
        }
        condition
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
