//! `POST /api/predict`: classify a multipart image upload.

use std::time::Instant;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::prediction::{predict_image, PredictionResult};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// An uploaded file part.
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

/// Classify the uploaded image.
///
/// Input problems (no multipart body, no `file` part, empty filename) are
/// rejected before the model is touched. Decoding and inference run on the
/// blocking pool; any failure there is a 500 with the message forwarded.
pub async fn predict(
    State(ctx): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Predict request without multipart body");
        ApiError::BadRequest("No file uploaded".into())
    })?;

    let upload = read_upload(&mut multipart).await?;
    let size = upload.bytes.len();
    let file_name = upload.file_name;
    let started = Instant::now();

    let worker_ctx = ctx.clone();
    let bytes = upload.bytes;
    let result = tokio::task::spawn_blocking(move || {
        predict_image(
            &bytes,
            worker_ctx.classifier.as_ref(),
            &worker_ctx.table,
        )
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Prediction task failed: {e}")))??;

    tracing::info!(
        file = %file_name,
        bytes = size,
        label = %result.prediction.label,
        confidence = result.prediction.confidence,
        backend = ctx.classifier.backend(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        success: true,
        result,
    }))
}

/// Pull the first `file` part that carries a filename. A part without a
/// filename is a plain form field, not an upload.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::BadRequest("No file selected".into()));
        }
        let bytes = field.bytes().await?;
        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest("No file uploaded".into()))
}
