pub mod affine_transform;
pub mod constants;
pub mod error;
pub mod image_tensor;
pub mod json_file;
