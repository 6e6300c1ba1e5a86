use serde::{Deserialize, Serialize};

/// One bounding box reported by the object detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetection {
    pub class_id: u32,
    pub confidence: f32,
    /// `[x1, y1, x2, y2]` in pixels.
    pub bbox: [f32; 4],
}

impl ObjectDetection {
    pub fn new(class_id: u32, confidence: f32, bbox: [f32; 4]) -> Self {
        Self {
            class_id,
            confidence,
            bbox,
        }
    }
}

/// True when any detection of `class_id` clears `min_confidence`.
pub fn class_visible(detections: &[ObjectDetection], class_id: u32, min_confidence: f32) -> bool {
    detections
        .iter()
        .any(|d| d.class_id == class_id && d.confidence >= min_confidence)
}
