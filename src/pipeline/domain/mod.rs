pub mod detection;
pub mod exercise;
pub mod face_metrics;
pub mod landmarks;
pub mod wellness;

#[cfg(test)]
pub(crate) mod test_support;

pub use detection::ObjectDetection;
pub use exercise::{PoseKeypoints, SquatCounter, SquatStage};
pub use face_metrics::FaceMetrics;
pub use landmarks::{LandmarkSet, Point};
pub use wellness::{Classification, WellnessState};
