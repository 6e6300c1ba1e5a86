use chrono::{DateTime, Utc};

use crate::config::ClassifierConfig;
use crate::pipeline::context::motion::MotionHistory;
use crate::pipeline::domain::face_metrics::FaceMetrics;
use crate::pipeline::domain::landmarks::LandmarkSet;
use crate::pipeline::domain::wellness::{Classification, WellnessState};

/// Everything the decision rules look at for one frame with a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSignals {
    pub metrics: FaceMetrics,
    pub shaking: bool,
}

/// One entry of the decision list.
pub struct Rule {
    pub state: WellnessState,
    pub details: &'static str,
    pub applies: fn(&FaceSignals, &ClassifierConfig) -> bool,
}

fn yawning(signals: &FaceSignals, config: &ClassifierConfig) -> bool {
    signals.metrics.mar > config.mar_threshold
}

fn drowsy(signals: &FaceSignals, config: &ClassifierConfig) -> bool {
    signals.metrics.ear < config.ear_threshold
}

fn tension(signals: &FaceSignals, config: &ClassifierConfig) -> bool {
    signals.shaking || signals.metrics.brow < config.brow_threshold
}

fn always(_: &FaceSignals, _: &ClassifierConfig) -> bool {
    true
}

/// Evaluated top to bottom, first match wins. The last rule always matches.
pub const RULES: [Rule; 4] = [
    Rule {
        state: WellnessState::Yawning,
        details: "Fatigue detected (Yawning)",
        applies: yawning,
    },
    Rule {
        state: WellnessState::Drowsy,
        details: "Fatigue detected (Drowsy)",
        applies: drowsy,
    },
    Rule {
        state: WellnessState::Headache,
        details: "Head pain or tension detected",
        applies: tension,
    },
    Rule {
        state: WellnessState::Focused,
        details: "User appears alert",
        applies: always,
    },
];

/// Turns landmark geometry plus recent head motion into a wellness state.
#[derive(Debug, Clone)]
pub struct FaceStateClassifier {
    config: ClassifierConfig,
}

impl FaceStateClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies one frame and updates `motion` as a side effect: a face
    /// appends its nose tip, no face clears the window.
    pub fn classify(
        &self,
        motion: &mut MotionHistory,
        landmarks: Option<&LandmarkSet>,
        using_phone: bool,
        captured_at: DateTime<Utc>,
    ) -> Classification {
        let Some(landmarks) = landmarks else {
            motion.clear();
            return Classification::no_face(using_phone);
        };

        motion.push(landmarks.nose_tip(), captured_at);
        let signals = FaceSignals {
            metrics: FaceMetrics::from_landmarks(landmarks),
            shaking: motion.is_shaking(self.config.shake_min_samples, self.config.shake_range),
        };

        let (state, details) = self.decide(&signals);
        tracing::debug!(
            "EAR:{:.3} MAR:{:.3} BROW:{:.3} SHAKE:{:.3} -> {}",
            signals.metrics.ear,
            signals.metrics.mar,
            signals.metrics.brow,
            motion.horizontal_range().unwrap_or(0.0),
            state
        );
        Classification::face(state, details, signals.metrics, using_phone)
    }

    pub fn decide(&self, signals: &FaceSignals) -> (WellnessState, &'static str) {
        RULES
            .iter()
            .find(|rule| (rule.applies)(signals, &self.config))
            .map(|rule| (rule.state, rule.details))
            .unwrap_or((WellnessState::Focused, "User appears alert"))
    }
}

impl Default for FaceStateClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
