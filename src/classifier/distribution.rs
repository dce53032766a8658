use super::ClassifierError;

/// Slack for float rounding in model output.
const PROBABILITY_TOLERANCE: f32 = 1e-3;
/// Allowed drift of the total mass from 1.0.
const SUM_TOLERANCE: f32 = 1e-2;

/// Validated classifier output: one probability per class label, in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<f32>,
}

/// One entry of a ranking: class index plus its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub confidence: f32,
}

impl Distribution {
    /// Accept `probs` only if it has one finite probability per class and
    /// the probabilities sum to 1.
    pub fn new(probs: Vec<f32>, num_classes: usize) -> Result<Self, ClassifierError> {
        if probs.is_empty() || probs.len() != num_classes {
            return Err(ClassifierError::OutputShape(format!(
                "expected {num_classes} class scores, got {}",
                probs.len()
            )));
        }
        if let Some((idx, value)) = probs.iter().enumerate().find(|(_, v)| {
            !v.is_finite() || **v < -PROBABILITY_TOLERANCE || **v > 1.0 + PROBABILITY_TOLERANCE
        }) {
            return Err(ClassifierError::InvalidDistribution(format!(
                "score {value} at index {idx} is not a probability"
            )));
        }
        let total: f32 = probs.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(ClassifierError::InvalidDistribution(format!(
                "scores sum to {total}, expected 1"
            )));
        }
        Ok(Self { probs })
    }

    pub fn probs(&self) -> &[f32] {
        &self.probs
    }

    /// Highest-probability class; the lowest index wins an exact tie.
    pub fn argmax(&self) -> Ranked {
        self.top_k(1)[0]
    }

    /// The `k` most probable classes, descending. Exact ties keep label order.
    pub fn top_k(&self, k: usize) -> Vec<Ranked> {
        let mut ranked: Vec<Ranked> = self
            .probs
            .iter()
            .enumerate()
            .map(|(index, &confidence)| Ranked { index, confidence })
            .collect();
        // Stable sort: equal confidences stay in index order.
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(probs: &[f32]) -> Distribution {
        Distribution::new(probs.to_vec(), probs.len()).unwrap()
    }

    #[test]
    fn top_three_of_reference_distribution() {
        let d = dist(&[0.7, 0.1, 0.05, 0.05, 0.03, 0.03, 0.02, 0.02]);
        assert_eq!(d.argmax().index, 0);
        let indices: Vec<usize> = d.top_k(3).iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn ties_prefer_lowest_index() {
        let d = dist(&[0.1, 0.3, 0.3, 0.3]);
        assert_eq!(d.argmax().index, 1);
        let indices: Vec<usize> = d.top_k(3).iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn top_k_is_descending() {
        let d = dist(&[0.05, 0.2, 0.6, 0.15]);
        let top = d.top_k(3);
        assert_eq!(top[0].index, 2);
        assert!(top.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn top_k_larger_than_classes_returns_all() {
        let d = dist(&[0.5, 0.5]);
        assert_eq!(d.top_k(3).len(), 2);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = Distribution::new(vec![0.5, 0.5], 8).unwrap_err();
        assert!(matches!(err, ClassifierError::OutputShape(_)));
    }

    #[test]
    fn non_probabilities_are_rejected() {
        assert!(Distribution::new(vec![f32::NAN, 1.0], 2).is_err());
        assert!(Distribution::new(vec![1.5, -0.5], 2).is_err());
        assert!(Distribution::new(vec![1.0004, 0.0], 2).is_ok());
    }

    #[test]
    fn scores_must_sum_to_one() {
        for probs in [vec![0.0; 8], vec![1.0; 8], vec![0.5, 0.2, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0]] {
            let err = Distribution::new(probs, 8).unwrap_err();
            assert!(matches!(err, ClassifierError::InvalidDistribution(_)));
        }
        assert!(Distribution::new(vec![0.495, 0.5], 2).is_ok());
    }
}
