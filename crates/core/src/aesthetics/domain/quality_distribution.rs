/// Ordered quality-bucket probabilities. Bucket `i` is quality rank `i + 1`,
/// rank 1 being the worst.
///
/// Softmax output rarely sums to exactly 1, so no sum is enforced here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QualityDistribution {
    probabilities: Vec<f32>,
}

impl QualityDistribution {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self { probabilities }
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.probabilities
    }

    pub fn mass(&self) -> f64 {
        self.probabilities.iter().map(|&p| p as f64).sum()
    }

    /// Rank (1-based) of the most probable bucket; the lowest rank wins ties.
    pub fn argmax_rank(&self) -> Option<usize> {
        self.probabilities
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
            .map(|(i, _)| i + 1)
    }
}

impl From<Vec<f32>> for QualityDistribution {
    fn from(probabilities: Vec<f32>) -> Self {
        Self::new(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_sums_buckets() {
        let dist = QualityDistribution::new(vec![0.25, 0.25, 0.5]);
        assert_eq!(dist.len(), 3);
        assert_relative_eq!(dist.mass(), 1.0);
    }

    #[test]
    fn test_argmax_rank() {
        let dist = QualityDistribution::from(vec![0.1, 0.6, 0.3]);
        assert_eq!(dist.argmax_rank(), Some(2));
    }

    #[test]
    fn test_argmax_rank_tie_prefers_lower_rank() {
        let dist = QualityDistribution::from(vec![0.4, 0.2, 0.4]);
        assert_eq!(dist.argmax_rank(), Some(1));
    }

    #[test]
    fn test_empty() {
        let dist = QualityDistribution::default();
        assert!(dist.is_empty());
        assert_eq!(dist.argmax_rank(), None);
        assert_relative_eq!(dist.mass(), 0.0);
    }
}
