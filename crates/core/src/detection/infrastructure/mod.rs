pub mod json_detection_reader;
pub mod mtcnn_decoder;
