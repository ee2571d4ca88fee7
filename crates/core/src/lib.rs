pub mod aesthetics;
pub mod alignment;
pub mod detection;
pub mod pipeline;
pub mod shared;
