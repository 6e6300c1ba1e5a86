use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde::Serialize;
use tokio::sync::Mutex;
use tower::Service;
use uuid::Uuid;

use crate::common::frame::ImagePayload;
use crate::error::AppError;
use crate::pipeline::context::session::SessionStore;
use crate::pipeline::domain::exercise::SquatStage;
use crate::pipeline::orchestration::detectors::Detectors;

pub struct ExerciseRequest {
    pub session_id: Uuid,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExerciseReport {
    Progress {
        count: u32,
        stage: Option<SquatStage>,
        message: String,
    },
    Failed {
        error: String,
    },
}

/// Feeds pose keypoints into the session's squat counter.
#[derive(Clone)]
pub struct ExerciseService {
    detectors: Detectors,
    sessions: Arc<Mutex<SessionStore>>,
}

impl ExerciseService {
    pub fn new(detectors: Detectors, sessions: Arc<Mutex<SessionStore>>) -> Self {
        Self {
            detectors,
            sessions,
        }
    }

    async fn track(
        detectors: &Detectors,
        sessions: &Mutex<SessionStore>,
        req: ExerciseRequest,
    ) -> Result<ExerciseReport, AppError> {
        let image = ImagePayload::new(&req.image).decode()?;
        let people = detectors.pose()?.estimate(&image).await?;

        let mut sessions = sessions.lock().await;
        let session = sessions.get_or_create(req.session_id);
        // only the first person drives the counter
        if let Some(pose) = people.first() {
            session.squats.update(pose);
        }
        Ok(ExerciseReport::Progress {
            count: session.squats.count(),
            stage: session.squats.stage(),
            message: "Processed".to_string(),
        })
    }
}

impl Service<ExerciseRequest> for ExerciseService {
    type Response = ExerciseReport;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ExerciseRequest) -> Self::Future {
        let detectors = self.detectors.clone();
        let sessions = self.sessions.clone();

        Box::pin(async move {
            Ok(Self::track(&detectors, &sessions, req)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Exercise Error: {}", e);
                    ExerciseReport::Failed {
                        error: e.to_string(),
                    }
                }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::frame::tests::png_base64;
    use crate::config::Configuration;
    use crate::pipeline::domain::exercise::{PoseKeypoints, LEFT_HIP, LEFT_KNEE};
    use crate::pipeline::orchestration::detectors::fakes::ScriptedPose;
    use tower::ServiceExt;

    fn person(hip_y: f32, knee_y: f32) -> Vec<PoseKeypoints> {
        let mut points = vec![(0.0, 0.0); 17];
        points[LEFT_HIP] = (300.0, hip_y);
        points[LEFT_KNEE] = (305.0, knee_y);
        vec![PoseKeypoints::new(points)]
    }

    fn request(session_id: Uuid) -> ExerciseRequest {
        ExerciseRequest {
            session_id,
            image: format!("data:image/png;base64,{}", png_base64(4, 4, [0, 0, 0])),
        }
    }

    #[tokio::test]
    async fn counts_squats_per_session() {
        let sessions = Arc::new(Mutex::new(SessionStore::new(Configuration::default())));
        let detectors = Detectors::new().with_pose_estimator(Arc::new(ScriptedPose::new(vec![
            person(390.0, 400.0),
            person(250.0, 400.0),
            vec![],
        ])));
        let mut service = ExerciseService::new(detectors, sessions);
        let id = Uuid::new_v4();

        let down = service.ready().await.unwrap().call(request(id)).await.unwrap();
        assert_eq!(
            down,
            ExerciseReport::Progress {
                count: 0,
                stage: Some(SquatStage::Down),
                message: "Processed".to_string()
            }
        );

        let up = service.ready().await.unwrap().call(request(id)).await.unwrap();
        let json = serde_json::to_value(&up).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["stage"], "up");

        // nobody in frame keeps the previous state
        let empty = service.ready().await.unwrap().call(request(id)).await.unwrap();
        assert_eq!(serde_json::to_value(&empty).unwrap()["count"], 1);
    }

    #[tokio::test]
    async fn missing_pose_model_reports_error() {
        let sessions = Arc::new(Mutex::new(SessionStore::new(Configuration::default())));
        let report = ExerciseService::new(Detectors::new(), sessions)
            .oneshot(request(Uuid::nil()))
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["error"].as_str().unwrap().contains("pose estimator"));
    }
}
