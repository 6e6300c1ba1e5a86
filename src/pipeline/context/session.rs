use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::motion::MotionHistory;
use crate::config::Configuration;
use crate::pipeline::domain::exercise::SquatCounter;

/// Per-user tracking state that has to survive between frames.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub motion: MotionHistory,
    pub squats: SquatCounter,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub frames_classified: u64,
    pub fatigue_frames: u64,
}

impl Session {
    pub fn new(id: Uuid, configuration: &Configuration) -> Self {
        let now = Utc::now();
        Self {
            id,
            motion: MotionHistory::new(configuration.classifier.motion_capacity),
            squats: SquatCounter::new(&configuration.exercise),
            created_at: now,
            last_seen: now,
            frames_classified: 0,
            fatigue_frames: 0,
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

/// Owns every live session. Requests that carry no session id share the
/// default (nil) session. Sessions idle for longer than the configured
/// timeout are dropped on the next lookup.
pub struct SessionStore {
    configuration: Configuration,
    sessions: HashMap<Uuid, Session>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(configuration: Configuration) -> Self {
        let idle_secs = i64::try_from(configuration.session.idle_secs).unwrap_or(i64::MAX);
        Self {
            idle_timeout: Duration::try_seconds(idle_secs).unwrap_or(Duration::MAX),
            configuration,
            sessions: HashMap::new(),
        }
    }

    pub fn default_session_id() -> Uuid {
        Uuid::nil()
    }

    /// Get or create session state
    pub fn get_or_create(&mut self, session_id: Uuid) -> &mut Session {
        self.prune_idle(Utc::now());
        let configuration = &self.configuration;
        let session = self.sessions.entry(session_id).or_insert_with(|| {
            tracing::info!("Creating session {}", session_id);
            Session::new(session_id, configuration)
        });
        session.touch();
        session
    }

    /// Drops every session last seen before `now - idle_timeout`.
    pub fn prune_idle(&mut self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = now.checked_sub_signed(self.idle_timeout) else {
            return 0;
        };
        let before = self.sessions.len();
        self.sessions.retain(|id, session| {
            let keep = session.last_seen >= cutoff;
            if !keep {
                tracing::info!("Dropping idle session {}", id);
            }
            keep
        });
        before - self.sessions.len()
    }

    pub fn get(&self, session_id: &Uuid) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn remove(&mut self, session_id: &Uuid) -> Option<Session> {
        self.sessions.remove(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
