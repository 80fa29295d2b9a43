use crate::models::{Course, Ledger, Outcome};
use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// How long a just-recorded marker stays live for the page animation.
pub const FEEDBACK_TTL: Duration = Duration::from_millis(400);

/// Presentation-only marker for the most recent recording. At most one is
/// live across all courses; the next recording replaces it. Never persisted,
/// and expiry is checked lazily at read time.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub course: String,
    pub kind: Outcome,
    pub expires_at: Instant,
}

impl Feedback {
    pub fn begin(course: impl Into<String>, kind: Outcome) -> Self {
        Self {
            course: course.into(),
            kind,
            expires_at: Instant::now() + FEEDBACK_TTL,
        }
    }

    pub fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct SharedData {
    pub ledger: Ledger,
    pub feedback: Option<Feedback>,
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub catalog: Arc<Vec<Course>>,
    pub data: Arc<Mutex<SharedData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, catalog: Vec<Course>, ledger: Ledger) -> Self {
        Self {
            data_path,
            catalog: Arc::new(catalog),
            data: Arc::new(Mutex::new(SharedData {
                ledger,
                feedback: None,
            })),
        }
    }
}
