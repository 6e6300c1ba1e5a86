pub mod frame_context;
pub mod metrics;
pub mod motion;
pub mod session;
pub mod state;

pub use frame_context::FrameContext;
pub use metrics::FrameMetrics;
pub use motion::{MotionHistory, MotionSample};
pub use session::{Session, SessionStore};
pub use state::{AnalyzedState, IngestedState, ProcessingState};
