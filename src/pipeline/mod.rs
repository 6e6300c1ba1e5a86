pub mod context;
pub mod domain;
pub mod orchestration;

pub use context::{FrameContext, Session, SessionStore};
pub use domain::{Classification, FaceMetrics, LandmarkSet, Point, WellnessState};
pub use orchestration::{Detectors, FaceAnalysisService, FaceStateClassifier};
