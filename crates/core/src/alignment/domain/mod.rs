pub mod aligned_face_spec;
pub mod alignment_config;
pub mod face_resampler;
pub mod geometric_aligner;
