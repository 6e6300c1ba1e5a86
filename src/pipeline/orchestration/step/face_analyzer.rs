use chrono::Utc;

use crate::config::{ClassifierConfig, PhoneConfig};
use crate::error::AppError;
use crate::pipeline::context::frame_context::FrameContext;
use crate::pipeline::context::session::Session;
use crate::pipeline::context::state::{AnalyzedState, IngestedState};
use crate::pipeline::domain::detection::class_visible;
use crate::pipeline::domain::landmarks::LandmarkSet;
use crate::pipeline::domain::wellness::Classification;
use crate::pipeline::orchestration::classifier::FaceStateClassifier;
use crate::pipeline::orchestration::detectors::Detectors;

/// What the external models saw in one frame.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub landmarks: Option<LandmarkSet>,
    pub using_phone: bool,
}

/// Runs the external models over a frame and feeds their output through the
/// classifier. Model calls happen in `observe`, which needs no session, so
/// callers can keep session locks out of the slow path.
pub struct FaceAnalyzer {
    classifier: FaceStateClassifier,
    detectors: Detectors,
    phone: PhoneConfig,
}

impl FaceAnalyzer {
    pub fn new(classifier: ClassifierConfig, phone: PhoneConfig, detectors: Detectors) -> Self {
        Self {
            classifier: FaceStateClassifier::new(classifier),
            detectors,
            phone,
        }
    }

    pub fn detectors(&self) -> &Detectors {
        &self.detectors
    }

    pub async fn observe(
        &self,
        ctx: &mut FrameContext<IngestedState>,
    ) -> Result<Observation, AppError> {
        let landmarks = self.detectors.face()?.detect(&ctx.frame().rgb()).await?;
        let using_phone = self.phone_visible(ctx).await?;
        ctx.record_detection();
        Ok(Observation {
            landmarks,
            using_phone,
        })
    }

    async fn phone_visible(&self, ctx: &FrameContext<IngestedState>) -> Result<bool, AppError> {
        let Some(objects) = &self.detectors.objects else {
            tracing::debug!("No object detector configured, assuming no phone");
            return Ok(false);
        };
        let detections = objects
            .detect(ctx.frame().image(), self.phone.confidence)
            .await?;
        Ok(class_visible(
            &detections,
            self.phone.class_id,
            self.phone.confidence,
        ))
    }

    pub fn analyze(
        &self,
        session: &mut Session,
        ctx: FrameContext<IngestedState>,
        observation: Observation,
    ) -> FrameContext<AnalyzedState> {
        let classification = self.classify(
            session,
            observation.landmarks.as_ref(),
            observation.using_phone,
        );
        ctx.into_analyzed(classification)
    }

    /// Classification entry point shared by the image and landmark routes.
    pub fn classify(
        &self,
        session: &mut Session,
        landmarks: Option<&LandmarkSet>,
        using_phone: bool,
    ) -> Classification {
        session.frames_classified += 1;
        let classification = self.classifier.classify(
            &mut session.motion,
            landmarks,
            using_phone,
            Utc::now(),
        );
        if classification.state.is_fatigue() {
            session.fatigue_frames += 1;
            tracing::debug!(
                "Session {} fatigue frames: {}/{}",
                session.id,
                session.fatigue_frames,
                session.frames_classified
            );
        }
        classification
    }
}
