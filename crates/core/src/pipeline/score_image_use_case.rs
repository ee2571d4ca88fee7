use crate::aesthetics::domain::aesthetics_engine::AestheticsEngine;
use crate::aesthetics::domain::score_aggregator::ScoreAggregator;
use crate::shared::image_tensor::ImageTensor;

/// Single-image aesthetic scoring: evaluate → aggregate.
pub struct ScoreImageUseCase {
    engine: Box<dyn AestheticsEngine>,
    aggregator: ScoreAggregator,
}

impl ScoreImageUseCase {
    pub fn new(engine: Box<dyn AestheticsEngine>, aggregator: ScoreAggregator) -> Self {
        Self { engine, aggregator }
    }

    /// Mean quality rank of the image, in `[1, bucket_count]`.
    pub fn execute(&mut self, image: &ImageTensor) -> Result<f64, Box<dyn std::error::Error>> {
        let distribution = self.engine.evaluate(image)?;
        let score = self.aggregator.aggregate(&distribution)?;
        log::debug!(
            "Scored {}x{} image: {score:.4} (mode rank {:?})",
            image.width(),
            image.height(),
            distribution.argmax_rank()
        );
        Ok(score)
    }
}
