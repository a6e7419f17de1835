//! Startup schema bootstrap: creates the sales table and the indexes
//! backing the hot query paths.

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entity::sales_record;

/// Creates the `sales_records` table and its indexes if they are
/// missing. Single-column indexes cover the per-label filters and
/// date-range scans; the compound ones cover the (`date`,`region`) and
/// (`category`,`product`) lookups the dashboard issues together.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(sales_record::Entity);
    db.execute(backend.build(table.if_not_exists())).await?;

    let single = [
        ("idx_sales_records_date", sales_record::Column::Date),
        ("idx_sales_records_region", sales_record::Column::Region),
        ("idx_sales_records_category", sales_record::Column::Category),
        ("idx_sales_records_product", sales_record::Column::Product),
    ];
    for (name, column) in single {
        let mut index = Index::create()
            .name(name)
            .table(sales_record::Entity)
            .col(column)
            .to_owned();
        db.execute(backend.build(index.if_not_exists())).await?;
    }

    let compound = [
        (
            "idx_sales_records_date_region",
            sales_record::Column::Date,
            sales_record::Column::Region,
        ),
        (
            "idx_sales_records_category_product",
            sales_record::Column::Category,
            sales_record::Column::Product,
        ),
    ];
    for (name, first, second) in compound {
        let mut index = Index::create()
            .name(name)
            .table(sales_record::Entity)
            .col(first)
            .col(second)
            .to_owned();
        db.execute(backend.build(index.if_not_exists())).await?;
    }

    Ok(())
}
