pub mod detector_options;
pub mod face_detection;
pub mod face_detector;
pub mod face_geometry;
pub mod face_results;
