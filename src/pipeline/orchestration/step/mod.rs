pub mod face_analyzer;

pub use face_analyzer::{FaceAnalyzer, Observation};
