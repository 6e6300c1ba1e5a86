use std::time::Duration;

/// Metrics collected during frame processing
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    detection_duration: Option<Duration>,
    analysis_duration: Option<Duration>,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_detection_duration(&mut self, duration: Duration) {
        self.detection_duration = Some(duration);
    }

    pub fn record_analysis_duration(&mut self, duration: Duration) {
        self.analysis_duration = Some(duration);
    }

    pub fn detection_duration(&self) -> Option<Duration> {
        self.detection_duration
    }

    pub fn analysis_duration(&self) -> Option<Duration> {
        self.analysis_duration
    }
}
