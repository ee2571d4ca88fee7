pub mod aesthetics_engine;
pub mod quality_distribution;
pub mod score_aggregator;
pub mod score_config;
