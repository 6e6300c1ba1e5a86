use crate::common::frame::Frame;
use crate::pipeline::context::metrics::FrameMetrics;
use crate::pipeline::context::state::{AnalyzedState, IngestedState, ProcessingState};
use crate::pipeline::domain::wellness::Classification;
use std::sync::Arc;
use std::time::{Duration, Instant};

// FrameContext with compile-time state tracking via the state marker
pub struct FrameContext<S> {
    frame: Arc<Frame>,
    metrics: FrameMetrics,
    processing_start: Instant,
    state: S,
}

impl<S: ProcessingState> FrameContext<S> {
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn state_name(&self) -> &'static str {
        S::state_name()
    }
}

impl FrameContext<IngestedState> {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Arc::new(frame),
            metrics: FrameMetrics::new(),
            processing_start: Instant::now(),
            state: IngestedState,
        }
    }

    pub fn record_detection(&mut self) {
        let elapsed = self.elapsed();
        self.metrics.record_detection_duration(elapsed);
    }

    pub fn into_analyzed(mut self, classification: Classification) -> FrameContext<AnalyzedState> {
        self.metrics.record_analysis_duration(self.elapsed());
        FrameContext::<AnalyzedState> {
            frame: self.frame,
            metrics: self.metrics,
            processing_start: self.processing_start,
            state: AnalyzedState { classification },
        }
    }
}

impl FrameContext<AnalyzedState> {
    pub fn classification(&self) -> &Classification {
        &self.state.classification
    }

    pub fn into_classification(self) -> Classification {
        self.state.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use uuid::Uuid;

    #[test]
    fn analysis_records_duration_and_state() {
        let frame = Frame::new(
            Uuid::new_v4(),
            DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
                4,
                4,
                Rgb([0, 0, 0]),
            )),
            Utc::now(),
            Uuid::new_v4(),
        );
        let mut context = FrameContext::new(frame);
        assert_eq!(context.state_name(), "Ingested");
        context.record_detection();

        let analyzed = context.into_analyzed(Classification::no_face(false));
        assert_eq!(analyzed.state_name(), "Analyzed");
        assert!(analyzed.metrics().detection_duration().is_some());
        assert!(analyzed.metrics().analysis_duration().is_some());
        assert!(!analyzed.classification().detected);
    }
}
