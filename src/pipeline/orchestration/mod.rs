pub mod classifier;
pub mod detectors;
pub mod service;
pub mod step;

pub use classifier::{FaceSignals, FaceStateClassifier, Rule, RULES};
pub use detectors::{Detectors, FaceLandmarker, ObjectDetector, PoseEstimator};
pub use service::{
    ExerciseReport, ExerciseRequest, ExerciseService, FaceAnalysisRequest, FaceAnalysisService,
    FaceInput,
};
pub use step::{FaceAnalyzer, Observation};
