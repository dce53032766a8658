//! Inference adapter around an opaque, externally trained image classifier.
//!
//! The model is loaded once at startup and shared read-only. Everything
//! here treats it as a pure function from a normalized image tensor to a
//! probability per entry of [`labels::CLASS_LABELS`].

pub mod distribution;
pub mod labels;
pub mod mock;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod preprocess;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use distribution::{Distribution, Ranked};
pub use labels::{CLASS_LABELS, NUM_CLASSES};
pub use mock::StaticClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use preprocess::{normalize, ImageTensor, PreprocessError};

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model not found at {0}")]
    ModelNotFound(PathBuf),

    #[error("Model initialization: {0}")]
    ModelInit(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    OutputShape(String),

    #[error("Model output is not a probability distribution: {0}")]
    InvalidDistribution(String),

    #[error("No inference backend compiled in (enable the `onnx` feature)")]
    BackendUnavailable,
}

/// A loaded classifier. Implementations must be safe to call from many
/// requests at once.
pub trait Classifier: Send + Sync {
    /// Raw per-class scores for one normalized image, in label order.
    fn classify(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    fn is_loaded(&self) -> bool {
        true
    }
}

/// Load the production classifier from `model_path`.
#[cfg(feature = "onnx")]
pub fn load_classifier(model_path: &Path) -> Result<Box<dyn Classifier>, ClassifierError> {
    Ok(Box::new(OnnxClassifier::load(model_path)?))
}

#[cfg(not(feature = "onnx"))]
pub fn load_classifier(model_path: &Path) -> Result<Box<dyn Classifier>, ClassifierError> {
    if !model_path.exists() {
        return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
    }
    Err(ClassifierError::BackendUnavailable)
}
