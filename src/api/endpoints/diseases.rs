//! Reference table endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{DiseaseRecord, DiseaseSummary};

#[derive(Serialize)]
pub struct DiseaseListResponse {
    pub diseases: Vec<DiseaseSummary>,
    pub total: usize,
    pub detectable_count: usize,
    pub categories: Vec<String>,
}

/// `GET /api/diseases`: every record summarized, detectable first.
pub async fn list(State(ctx): State<ApiContext>) -> Json<DiseaseListResponse> {
    let diseases = ctx.table.sorted_summaries();
    Json(DiseaseListResponse {
        total: diseases.len(),
        detectable_count: diseases.iter().filter(|d| d.detectable).count(),
        categories: ctx.table.categories(),
        diseases,
    })
}

/// `GET /api/disease/:name`: case-insensitive lookup of one record.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<DiseaseRecord>, ApiError> {
    ctx.table
        .lookup(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Disease not found".into()))
}
