use async_trait::async_trait;
use image::{DynamicImage, RgbImage};
use std::sync::Arc;

use crate::error::DetectorError;
use crate::pipeline::domain::detection::ObjectDetection;
use crate::pipeline::domain::exercise::PoseKeypoints;
use crate::pipeline::domain::landmarks::LandmarkSet;

/// External face-mesh model. Returns at most one face.
#[async_trait]
pub trait FaceLandmarker: Send + Sync {
    async fn detect(&self, image: &RgbImage) -> Result<Option<LandmarkSet>, DetectorError>;
    fn name(&self) -> &'static str;
}

/// External object detector (COCO-80 classes).
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    async fn detect(
        &self,
        image: &DynamicImage,
        min_confidence: f32,
    ) -> Result<Vec<ObjectDetection>, DetectorError>;
    fn name(&self) -> &'static str;
}

/// External pose model, one entry per person, most prominent first.
#[async_trait]
pub trait PoseEstimator: Send + Sync {
    async fn estimate(&self, image: &DynamicImage) -> Result<Vec<PoseKeypoints>, DetectorError>;
    fn name(&self) -> &'static str;
}

/// The set of models wired into the service. Any of them may be missing;
/// routes that need a missing model answer with an error result.
#[derive(Clone, Default)]
pub struct Detectors {
    pub face: Option<Arc<dyn FaceLandmarker>>,
    pub objects: Option<Arc<dyn ObjectDetector>>,
    pub pose: Option<Arc<dyn PoseEstimator>>,
}

impl Detectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_face_landmarker(mut self, landmarker: Arc<dyn FaceLandmarker>) -> Self {
        self.face = Some(landmarker);
        self
    }

    pub fn with_object_detector(mut self, detector: Arc<dyn ObjectDetector>) -> Self {
        self.objects = Some(detector);
        self
    }

    pub fn with_pose_estimator(mut self, estimator: Arc<dyn PoseEstimator>) -> Self {
        self.pose = Some(estimator);
        self
    }

    pub fn face(&self) -> Result<&Arc<dyn FaceLandmarker>, DetectorError> {
        self.face
            .as_ref()
            .ok_or(DetectorError::Unavailable("face landmarker"))
    }

    pub fn pose(&self) -> Result<&Arc<dyn PoseEstimator>, DetectorError> {
        self.pose
            .as_ref()
            .ok_or(DetectorError::Unavailable("pose estimator"))
    }

    pub fn describe(&self) -> String {
        let names: Vec<&str> = [
            self.face.as_ref().map(|d| d.name()),
            self.objects.as_ref().map(|d| d.name()),
            self.pose.as_ref().map(|d| d.name()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join("/")
        }
    }
}
