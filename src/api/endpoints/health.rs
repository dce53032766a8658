//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::classifier::NUM_CLASSES;
use crate::config::MODEL_TYPE;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub detectable_diseases: usize,
    pub total_diseases_in_database: usize,
    pub model_type: &'static str,
}

/// `GET /api/health`. Always succeeds once the server is up.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: ctx.classifier.is_loaded(),
        detectable_diseases: NUM_CLASSES,
        total_diseases_in_database: ctx.table.len(),
        model_type: MODEL_TYPE,
    })
}
