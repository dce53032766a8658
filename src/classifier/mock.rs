use super::{Classifier, ClassifierError, ImageTensor};

/// Classifier that ignores its input and returns a fixed score vector.
/// Test double for the inference backend; the server itself always loads a model.
pub struct StaticClassifier {
    scores: Vec<f32>,
}

impl StaticClassifier {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    /// All mass on `index`.
    pub fn certain(index: usize, num_classes: usize) -> Self {
        let mut scores = vec![0.0; num_classes];
        if let Some(slot) = scores.get_mut(index) {
            *slot = 1.0;
        }
        Self::new(scores)
    }
}

impl Classifier for StaticClassifier {
    fn classify(&self, _input: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        Ok(self.scores.clone())
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}
