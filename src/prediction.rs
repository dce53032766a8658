//! Prediction pipeline: normalize → classify → rank → decorate from the
//! reference table. Pure with respect to its inputs; nothing is persisted.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::classifier::{
    normalize, Classifier, ClassifierError, Distribution, PreprocessError, CLASS_LABELS,
    NUM_CLASSES,
};
use crate::config::IMAGE_SIZE;
use crate::models::RelatedCondition;
use crate::reference::ReferenceTable;

pub const TOP_PREDICTIONS: usize = 3;

const UNKNOWN_CATEGORY: &str = "Unknown";
const UNKNOWN_SEVERITY: &str = "unknown";
const DEFAULT_RECOMMENDATION: &str = "Please consult a healthcare professional.";

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Primary prediction decorated with its reference record.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionDetail {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f32,
    pub category: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub recommendation: String,
    pub severity: String,
    pub contagious: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPrediction {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f32,
    pub category: String,
}

/// Per-request result; built, serialized, dropped.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub prediction: PredictionDetail,
    pub top_predictions: Vec<TopPrediction>,
    pub related_conditions: Vec<RelatedCondition>,
}

/// Run the full pipeline on raw upload bytes.
pub fn predict_image(
    bytes: &[u8],
    classifier: &dyn Classifier,
    table: &ReferenceTable,
) -> Result<PredictionResult, PredictionError> {
    let input = normalize(bytes, IMAGE_SIZE)?;
    let scores = classifier.classify(&input)?;
    let distribution = Distribution::new(scores, NUM_CLASSES)?;
    Ok(build_prediction(&distribution, table))
}

/// Turn a validated distribution into the response model.
pub fn build_prediction(distribution: &Distribution, table: &ReferenceTable) -> PredictionResult {
    let best = distribution.argmax();
    let label = CLASS_LABELS[best.index];
    let record = table.get_exact(label);
    debug!(label, confidence = best.confidence, "Primary prediction");

    let prediction = match record {
        Some(r) => PredictionDetail {
            label: label.to_string(),
            confidence: best.confidence,
            category: r.category.clone(),
            description: r.description.clone(),
            symptoms: r.symptoms.clone(),
            causes: r.causes.clone(),
            recommendation: r.recommendation.clone(),
            severity: r.severity.as_str().to_string(),
            contagious: r.contagious,
        },
        None => PredictionDetail {
            label: label.to_string(),
            confidence: best.confidence,
            category: UNKNOWN_CATEGORY.to_string(),
            description: String::new(),
            symptoms: Vec::new(),
            causes: Vec::new(),
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
            severity: UNKNOWN_SEVERITY.to_string(),
            contagious: false,
        },
    };

    let top_predictions = distribution
        .top_k(TOP_PREDICTIONS)
        .into_iter()
        .map(|ranked| {
            let label = CLASS_LABELS[ranked.index];
            TopPrediction {
                label: label.to_string(),
                confidence: ranked.confidence,
                category: table
                    .get_exact(label)
                    .map(|r| r.category.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            }
        })
        .collect();

    PredictionResult {
        prediction,
        top_predictions,
        related_conditions: table.related_conditions(label),
    }
}
