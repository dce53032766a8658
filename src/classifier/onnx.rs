use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::TensorRef;

use super::{Classifier, ClassifierError, ImageTensor};

/// Image classifier backed by ONNX Runtime.
///
/// The artifact takes a float32 NHWC batch `(1, H, W, 3)` and returns one
/// probability row `(1, N)`. `Session::run` needs `&mut self`, hence the Mutex
/// behind the `&self` trait method.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the model once; a missing file is reported before ONNX Runtime is touched.
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        tracing::info!(path = %model_path.display(), "ONNX classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        let tensor = TensorRef::from_array_view(input.as_array())
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        let (shape, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

        // Expect [1, N]; tolerate a bare [N].
        let width = match shape.len() {
            2 if shape[0] == 1 => shape[1] as usize,
            1 => shape[0] as usize,
            _ => {
                return Err(ClassifierError::OutputShape(format!(
                    "unexpected output shape {shape:?}"
                )))
            }
        };

        scores
            .get(..width)
            .map(<[f32]>::to_vec)
            .ok_or_else(|| ClassifierError::OutputShape(format!("output shorter than {width}")))
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
