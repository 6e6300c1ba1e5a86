use serde::{Deserialize, Serialize};
use std::fmt;

use super::face_metrics::FaceMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellnessState {
    Focused,
    Drowsy,
    Yawning,
    Headache,
    #[serde(rename = "No Face")]
    NoFace,
    /// The frame could not be analysed at all (decode or detector failure).
    Error,
}

impl WellnessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WellnessState::Focused => "Focused",
            WellnessState::Drowsy => "Drowsy",
            WellnessState::Yawning => "Yawning",
            WellnessState::Headache => "Headache",
            WellnessState::NoFace => "No Face",
            WellnessState::Error => "Error",
        }
    }

    pub fn is_fatigue(&self) -> bool {
        matches!(self, WellnessState::Drowsy | WellnessState::Yawning)
    }
}

impl fmt::Display for WellnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub detected: bool,
    pub state: WellnessState,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FaceMetrics>,
    pub using_phone: bool,
}

impl Classification {
    pub fn face(
        state: WellnessState,
        details: impl Into<String>,
        metrics: FaceMetrics,
        using_phone: bool,
    ) -> Self {
        Self {
            detected: true,
            state,
            details: details.into(),
            metrics: Some(metrics),
            using_phone,
        }
    }

    pub fn no_face(using_phone: bool) -> Self {
        Self {
            detected: false,
            state: WellnessState::NoFace,
            details: "No face detected".to_string(),
            metrics: None,
            using_phone,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            detected: false,
            state: WellnessState::Error,
            details: message.into(),
            metrics: None,
            using_phone: false,
        }
    }
}
