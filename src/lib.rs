pub mod api;
pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;

pub use api::{ApiRequest, ApiResponse, VolumeProbe, WellnessService};
pub use config::Configuration;
pub use error::{AppError, ConfigError, DecodeError, DetectorError, LandmarkError};
pub use pipeline::orchestration::{FaceLandmarker, ObjectDetector, PoseEstimator};
pub use pipeline::{Classification, Detectors, LandmarkSet, Point, WellnessState};
