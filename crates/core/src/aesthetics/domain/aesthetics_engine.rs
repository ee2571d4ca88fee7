use crate::shared::image_tensor::ImageTensor;

use super::quality_distribution::QualityDistribution;

/// Domain interface for aesthetic quality models (NIMA-style heads).
///
/// Returns the raw per-bucket distribution; reducing it to a score is
/// [`ScoreAggregator`](super::score_aggregator::ScoreAggregator)'s job.
pub trait AestheticsEngine: Send {
    fn evaluate(
        &mut self,
        image: &ImageTensor,
    ) -> Result<QualityDistribution, Box<dyn std::error::Error>>;
}
