use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower::{Service, ServiceExt};
use uuid::Uuid;

use crate::api::catalog::{self, AppLink, NewsItem, Weather};
use crate::api::resolve::UrlResolver;
use crate::api::volume::{VolumeProbe, VolumeReport};
use crate::common::frame::ImagePayload;
use crate::config::Configuration;
use crate::error::{AppError, ConfigError};
use crate::pipeline::context::session::SessionStore;
use crate::pipeline::domain::landmarks::Point;
use crate::pipeline::domain::wellness::Classification;
use crate::pipeline::orchestration::detectors::Detectors;
use crate::pipeline::orchestration::service::{
    ExerciseReport, ExerciseRequest, ExerciseService, FaceAnalysisRequest, FaceAnalysisService,
    FaceInput,
};
use crate::pipeline::orchestration::step::face_analyzer::FaceAnalyzer;

/// One request per route. `session` falls back to the shared default session.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum ApiRequest {
    Status,
    Weather,
    News,
    Apps,
    Resolve {
        query: String,
    },
    History {
        query: String,
    },
    AnalyzeFace {
        image: String,
        #[serde(default)]
        session: Option<Uuid>,
    },
    ClassifyLandmarks {
        landmarks: Option<Vec<Point>>,
        #[serde(default)]
        using_phone: bool,
        #[serde(default)]
        session: Option<Uuid>,
    },
    FaceAuth {
        image: String,
    },
    Exercise {
        image: String,
        #[serde(default)]
        session: Option<Uuid>,
    },
    Volume,
}

impl ApiRequest {
    pub fn route(&self) -> &'static str {
        match self {
            ApiRequest::Status => "status",
            ApiRequest::Weather => "weather",
            ApiRequest::News => "news",
            ApiRequest::Apps => "apps",
            ApiRequest::Resolve { .. } => "resolve",
            ApiRequest::History { .. } => "history",
            ApiRequest::AnalyzeFace { .. } => "analyze_face",
            ApiRequest::ClassifyLandmarks { .. } => "classify_landmarks",
            ApiRequest::FaceAuth { .. } => "face_auth",
            ApiRequest::Exercise { .. } => "exercise",
            ApiRequest::Volume => "volume",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Status {
        status: &'static str,
        backend: String,
    },
    Weather(Weather),
    News(Vec<NewsItem>),
    Apps(Vec<AppLink>),
    Resolved {
        url: String,
    },
    Logged {
        status: &'static str,
    },
    Classification(Classification),
    FaceAuth {
        authorized: bool,
        message: &'static str,
    },
    Exercise(ExerciseReport),
    Volume(VolumeReport),
}

struct Shared {
    analyzer: Arc<FaceAnalyzer>,
    resolver: UrlResolver,
    volume: Option<Arc<dyn VolumeProbe>>,
    high_percent: u8,
    backend: String,
}

/// Dispatches every route to the component that owns it. Cloning is cheap;
/// clones share sessions and detectors.
#[derive(Clone)]
pub struct WellnessService {
    shared: Arc<Shared>,
    face: FaceAnalysisService,
    exercise: ExerciseService,
    sessions: Arc<Mutex<SessionStore>>,
}

pub struct WellnessServiceBuilder {
    configuration: Configuration,
    detectors: Detectors,
    volume: Option<Arc<dyn VolumeProbe>>,
}

impl WellnessServiceBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            detectors: Detectors::new(),
            volume: None,
        }
    }

    pub fn with_detectors(mut self, detectors: Detectors) -> Self {
        self.detectors = detectors;
        self
    }

    pub fn with_volume_probe(mut self, probe: Arc<dyn VolumeProbe>) -> Self {
        self.volume = Some(probe);
        self
    }

    pub fn build(self) -> Result<WellnessService, AppError> {
        let Self {
            configuration,
            detectors,
            volume,
        } = self;

        let backend = detectors.describe();
        let analyzer = Arc::new(FaceAnalyzer::new(
            configuration.classifier.clone(),
            configuration.phone.clone(),
            detectors.clone(),
        ));
        let high_percent = configuration.volume.high_percent;
        let sessions = Arc::new(Mutex::new(SessionStore::new(configuration)));
        let resolver = UrlResolver::new()
            .map_err(|e| ConfigError::Invalid(format!("url patterns failed to compile: {e}")))?;

        tracing::info!("Wellness service ready (models: {})", backend);
        Ok(WellnessService {
            face: FaceAnalysisService::new(analyzer.clone(), sessions.clone()),
            exercise: ExerciseService::new(detectors, sessions.clone()),
            shared: Arc::new(Shared {
                analyzer,
                resolver,
                volume,
                high_percent,
                backend,
            }),
            sessions,
        })
    }
}

impl WellnessService {
    pub fn builder(configuration: Configuration) -> WellnessServiceBuilder {
        WellnessServiceBuilder::new(configuration)
    }

    pub fn sessions(&self) -> &Arc<Mutex<SessionStore>> {
        &self.sessions
    }

    async fn face_auth(analyzer: &FaceAnalyzer, image: &str) -> ApiResponse {
        let detected = async {
            let image = ImagePayload::new(image).decode()?;
            let face = analyzer.detectors().face()?.detect(&image.to_rgb8()).await?;
            Ok::<_, AppError>(face.is_some())
        };
        let (authorized, message) = match detected.await {
            Ok(true) => (true, "Authorized: User"),
            Ok(false) => (false, "Scanning..."),
            Err(e) => {
                tracing::error!("Face Auth Error: {}", e);
                (false, "Error")
            }
        };
        ApiResponse::FaceAuth {
            authorized,
            message,
        }
    }
}

fn session_or_default(session: Option<Uuid>) -> Uuid {
    session.unwrap_or_else(SessionStore::default_session_id)
}

impl Service<ApiRequest> for WellnessService {
    type Response = ApiResponse;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ApiRequest) -> Self::Future {
        let shared = self.shared.clone();
        let face = self.face.clone();
        let exercise = self.exercise.clone();

        Box::pin(async move {
            tracing::debug!("Handling route {}", req.route());
            let response = match req {
                ApiRequest::Status => ApiResponse::Status {
                    status: "running",
                    backend: shared.backend.clone(),
                },
                ApiRequest::Weather => ApiResponse::Weather(catalog::weather()),
                ApiRequest::News => ApiResponse::News(catalog::news()),
                ApiRequest::Apps => ApiResponse::Apps(catalog::apps()),
                ApiRequest::Resolve { query } => ApiResponse::Resolved {
                    url: shared.resolver.resolve(&query),
                },
                ApiRequest::History { query } => {
                    tracing::info!("Visited: {}", query);
                    ApiResponse::Logged { status: "logged" }
                }
                ApiRequest::AnalyzeFace { image, session } => {
                    let request = FaceAnalysisRequest {
                        session_id: session_or_default(session),
                        input: FaceInput::Image(image),
                    };
                    ApiResponse::Classification(face.oneshot(request).await?)
                }
                ApiRequest::ClassifyLandmarks {
                    landmarks,
                    using_phone,
                    session,
                } => {
                    let request = FaceAnalysisRequest {
                        session_id: session_or_default(session),
                        input: FaceInput::Landmarks {
                            points: landmarks,
                            using_phone,
                        },
                    };
                    ApiResponse::Classification(face.oneshot(request).await?)
                }
                ApiRequest::FaceAuth { image } => Self::face_auth(&shared.analyzer, &image).await,
                ApiRequest::Exercise { image, session } => {
                    let request = ExerciseRequest {
                        session_id: session_or_default(session),
                        image,
                    };
                    ApiResponse::Exercise(exercise.oneshot(request).await?)
                }
                ApiRequest::Volume => ApiResponse::Volume(VolumeReport::read(
                    shared.volume.as_deref(),
                    shared.high_percent,
                )),
            };
            Ok(response)
        })
    }
}
