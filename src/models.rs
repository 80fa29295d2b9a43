use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttendanceRecord {
    pub attended: u64,
    pub total: u64,
}

/// Serialized as the bare JSON object `{"CS23601": {"attended": 3, "total": 4}, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ledger {
    pub courses: BTreeMap<String, AttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Attended,
    Missed,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub course: String,
    pub outcome: String,
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UndoRequest {
    pub course: String,
}

#[derive(Debug, Serialize)]
pub struct CourseStanding {
    pub code: String,
    pub name: String,
    pub color: String,
    pub attended: u64,
    pub total: u64,
    pub percentage: f64,
    pub status: &'static str,
    pub status_class: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FeedbackInfo {
    pub course: String,
    pub kind: Outcome,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub courses: Vec<CourseStanding>,
    pub feedback: Option<FeedbackInfo>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub course: CourseStanding,
    pub feedback: Option<FeedbackInfo>,
}
