use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::Mutex;
use tower::Service;
use uuid::Uuid;

use crate::common::frame::{Frame, ImagePayload};
use crate::error::AppError;
use crate::pipeline::context::frame_context::FrameContext;
use crate::pipeline::context::session::SessionStore;
use crate::pipeline::domain::landmarks::{LandmarkSet, Point};
use crate::pipeline::domain::wellness::Classification;
use crate::pipeline::orchestration::step::face_analyzer::FaceAnalyzer;

pub enum FaceInput {
    /// Base64 webcam frame, optionally with a data-URL header.
    Image(String),
    /// Landmarks already extracted by the client. `None` means no face.
    Landmarks {
        points: Option<Vec<Point>>,
        using_phone: bool,
    },
}

pub struct FaceAnalysisRequest {
    pub session_id: Uuid,
    pub input: FaceInput,
}

/// Classifies frames against per-session motion state. Every failure is
/// folded into an `Error` classification, so callers always get a result.
#[derive(Clone)]
pub struct FaceAnalysisService {
    analyzer: Arc<FaceAnalyzer>,
    sessions: Arc<Mutex<SessionStore>>,
}

impl FaceAnalysisService {
    pub fn new(analyzer: Arc<FaceAnalyzer>, sessions: Arc<Mutex<SessionStore>>) -> Self {
        Self { analyzer, sessions }
    }

    async fn analyze_image(
        analyzer: &FaceAnalyzer,
        sessions: &Mutex<SessionStore>,
        session_id: Uuid,
        image: &str,
    ) -> Result<Classification, AppError> {
        let frame = Frame::from_payload(session_id, &ImagePayload::new(image))?;
        let mut ctx = FrameContext::new(frame);
        let observation = analyzer.observe(&mut ctx).await?;

        let mut sessions = sessions.lock().await;
        let session = sessions.get_or_create(session_id);
        let analyzed = analyzer.analyze(session, ctx, observation);
        tracing::debug!(
            "Frame {} analyzed in {:?}",
            analyzed.frame().frame_id(),
            analyzed.metrics().analysis_duration()
        );
        Ok(analyzed.into_classification())
    }

    async fn classify_landmarks(
        analyzer: &FaceAnalyzer,
        sessions: &Mutex<SessionStore>,
        session_id: Uuid,
        points: Option<Vec<Point>>,
        using_phone: bool,
    ) -> Result<Classification, AppError> {
        let landmarks = points.map(LandmarkSet::new).transpose()?;

        let mut sessions = sessions.lock().await;
        let session = sessions.get_or_create(session_id);
        Ok(analyzer.classify(session, landmarks.as_ref(), using_phone))
    }
}

impl Service<FaceAnalysisRequest> for FaceAnalysisService {
    type Response = Classification;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: FaceAnalysisRequest) -> Self::Future {
        let analyzer = self.analyzer.clone();
        let sessions = self.sessions.clone();

        Box::pin(async move {
            let result = match req.input {
                FaceInput::Image(image) => {
                    Self::analyze_image(&analyzer, &sessions, req.session_id, &image).await
                }
                FaceInput::Landmarks {
                    points,
                    using_phone,
                } => {
                    Self::classify_landmarks(
                        &analyzer,
                        &sessions,
                        req.session_id,
                        points,
                        using_phone,
                    )
                    .await
                }
            };

            Ok(result.unwrap_or_else(|e| {
                tracing::warn!("Face Analysis Error: {}", e);
                Classification::error(e.to_string())
            }))
        })
    }
}
