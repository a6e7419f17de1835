use axum::{
    Json,
    extract::{Multipart, State},
};
use sea_orm::{ActiveValue::NotSet, EntityTrait, Set};
use serde::Serialize;

use crate::entity::sales_record;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub inserted: usize,
    pub skipped: usize,
}

/// POST /sales/upload - parse an uploaded CSV/XLSX/XLS export and bulk
/// insert every valid row.
///
/// The upload is buffered in memory (the body limit caps it at 10 MB)
/// and dropped on every exit path. Accepted rows go in as one
/// `insert_many`; a failed insert fails the whole upload, there is no
/// partial commit.
#[tracing::instrument(name = "POST /sales/upload", skip(state, multipart))]
pub async fn upload_sales_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let extension = file_name.rsplit('.').next().unwrap_or_default();

    let outcome = salesboard_ingest::ingest(&bytes, extension)?;

    let models: Vec<sales_record::ActiveModel> = outcome
        .rows
        .into_iter()
        .map(|row| sales_record::ActiveModel {
            id: NotSet,
            date: Set(row.date),
            product: Set(row.product),
            category: Set(row.category),
            region: Set(row.region),
            quantity: Set(row.quantity),
            price: Set(row.price),
            revenue: Set(row.revenue),
        })
        .collect();

    sales_record::Entity::insert_many(models)
        .exec(&state.db)
        .await?;

    tracing::info!(
        inserted = outcome.accepted,
        skipped = outcome.rejected,
        file = %file_name,
        "sales upload ingested"
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        inserted: outcome.accepted,
        skipped: outcome.rejected,
    }))
}
