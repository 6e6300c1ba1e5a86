pub mod exercise_service;
pub mod face_analysis_service;

pub use exercise_service::{ExerciseReport, ExerciseRequest, ExerciseService};
pub use face_analysis_service::{FaceAnalysisRequest, FaceAnalysisService, FaceInput};
