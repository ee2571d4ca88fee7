pub mod align_faces_use_case;
pub mod batch_executor;
pub mod infrastructure;
pub mod score_image_use_case;
