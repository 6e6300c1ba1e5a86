use serde::{Deserialize, Serialize};

use crate::config::ExerciseConfig;

// COCO-17 keypoint ordering
pub const LEFT_HIP: usize = 11;
pub const LEFT_KNEE: usize = 13;

/// Keypoints of one person in pixel coordinates (y grows downward). A
/// keypoint the estimator could not place is reported at `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseKeypoints {
    pub points: Vec<(f32, f32)>,
}

impl PoseKeypoints {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    /// Returns the keypoint only when the estimator actually placed it.
    pub fn visible(&self, index: usize) -> Option<(f32, f32)> {
        self.points
            .get(index)
            .copied()
            .filter(|(x, y)| x + y > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquatStage {
    Down,
    Up,
}

/// Two-stage squat counter driven by the left hip and knee.
#[derive(Debug, Clone)]
pub struct SquatCounter {
    count: u32,
    stage: Option<SquatStage>,
    down_offset: f32,
    up_offset: f32,
}

impl SquatCounter {
    pub fn new(config: &ExerciseConfig) -> Self {
        Self {
            count: 0,
            stage: None,
            down_offset: config.down_offset,
            up_offset: config.up_offset,
        }
    }

    /// Advances the stage machine for one pose; the count only grows on a
    /// down -> up transition.
    pub fn update(&mut self, pose: &PoseKeypoints) {
        let (Some(hip), Some(knee)) = (pose.visible(LEFT_HIP), pose.visible(LEFT_KNEE)) else {
            return;
        };
        let (hip_y, knee_y) = (hip.1, knee.1);

        if hip_y > knee_y - self.down_offset {
            self.stage = Some(SquatStage::Down);
        }
        if hip_y < knee_y - self.up_offset && self.stage == Some(SquatStage::Down) {
            self.stage = Some(SquatStage::Up);
            self.count += 1;
            tracing::debug!("Squat completed, count={}", self.count);
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn stage(&self) -> Option<SquatStage> {
        self.stage
    }
}
