//! `SeaORM` Entity for uploaded sales records

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of historical sales activity, immutable once inserted.
///
/// `date` is stored as zero-padded `YYYY-MM-DD` text; range filters and
/// ordering rely on lexicographic comparison of that string, so the
/// column must never be migrated to a calendar type.
///
/// `revenue` is stored independently of `quantity * price` and is never
/// reconciled against them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub date: String,
    #[sea_orm(column_type = "Text")]
    pub product: String,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub region: String,
    pub quantity: f64,
    pub price: Option<f64>,
    pub revenue: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
