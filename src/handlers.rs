use crate::errors::AppError;
use crate::ledger::{self, StatusTier};
use crate::models::{
    AttendanceRecord, Course, CourseStanding, FeedbackInfo, Ledger, Outcome, RecordRequest,
    RecordResponse, SnapshotResponse, UndoRequest,
};
use crate::state::{AppState, Feedback, SharedData};
use crate::storage::{clear_ledger, persist_ledger};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&state.catalog, &data.ledger))
}

pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(snapshot(&state.catalog, &data)))
}

pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let outcome = match payload.outcome.trim() {
        "attended" => Outcome::Attended,
        "missed" => Outcome::Missed,
        _ => {
            return Err(AppError::bad_request(
                "outcome must be 'attended' or 'missed'",
            ));
        }
    };

    let response = apply_record(&state, &payload.course, outcome, payload.count).await?;
    Ok(Json(response))
}

pub async fn undo(
    State(state): State<AppState>,
    Json(payload): Json<UndoRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let response = apply_undo(&state, &payload.course).await?;
    Ok(Json(response))
}

/// Zeroes every course and discards the persisted file. The confirmation
/// gate lives in the page; the server resets unconditionally.
pub async fn reset(State(state): State<AppState>) -> Result<Json<SnapshotResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.ledger = Ledger::fresh(&state.catalog);
    data.feedback = None;
    clear_ledger(&state.data_path).await?;
    Ok(Json(snapshot(&state.catalog, &data)))
}

pub async fn mark_attended(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    apply_record(&state, &code, Outcome::Attended, 1).await?;
    Ok(Redirect::to("/"))
}

pub async fn mark_missed(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    apply_record(&state, &code, Outcome::Missed, 1).await?;
    Ok(Redirect::to("/"))
}

pub async fn undo_last(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    apply_undo(&state, &code).await?;
    Ok(Redirect::to("/"))
}

async fn apply_record(
    state: &AppState,
    code: &str,
    outcome: Outcome,
    count: u64,
) -> Result<RecordResponse, AppError> {
    if count == 0 {
        return Err(AppError::bad_request("count must be a positive integer"));
    }
    let course = find_course(&state.catalog, code)
        .ok_or_else(|| AppError::not_found(format!("unknown course '{code}'")))?;

    let mut data = state.data.lock().await;
    let updated = match outcome {
        Outcome::Attended => data.ledger.record_attended(code, count),
        Outcome::Missed => data.ledger.record_missed(code, count),
    }
    .ok_or_else(|| AppError::not_found(format!("unknown course '{code}'")))?;

    data.feedback = Some(Feedback::begin(code, outcome));
    persist_ledger(&state.data_path, &data.ledger).await?;

    Ok(RecordResponse {
        course: standing(course, updated),
        feedback: live_feedback(&data),
    })
}

async fn apply_undo(state: &AppState, code: &str) -> Result<RecordResponse, AppError> {
    let course = find_course(&state.catalog, code)
        .ok_or_else(|| AppError::not_found(format!("unknown course '{code}'")))?;

    let mut data = state.data.lock().await;
    let updated = data
        .ledger
        .undo(code)
        .ok_or_else(|| AppError::not_found(format!("unknown course '{code}'")))?;

    persist_ledger(&state.data_path, &data.ledger).await?;

    Ok(RecordResponse {
        course: standing(course, updated),
        feedback: live_feedback(&data),
    })
}

fn find_course<'a>(catalog: &'a [Course], code: &str) -> Option<&'a Course> {
    catalog.iter().find(|course| course.code == code)
}

fn standing(course: &Course, record: AttendanceRecord) -> CourseStanding {
    let pct = ledger::percentage(&record);
    let tier = StatusTier::from_percentage(pct);
    CourseStanding {
        code: course.code.clone(),
        name: course.name.clone(),
        color: course.color.clone(),
        attended: record.attended,
        total: record.total,
        percentage: pct,
        status: tier.label(),
        status_class: tier.class(),
    }
}

fn live_feedback(data: &SharedData) -> Option<FeedbackInfo> {
    data.feedback
        .as_ref()
        .filter(|feedback| feedback.is_live())
        .map(|feedback| FeedbackInfo {
            course: feedback.course.clone(),
            kind: feedback.kind,
        })
}

fn snapshot(catalog: &[Course], data: &SharedData) -> SnapshotResponse {
    let courses = catalog
        .iter()
        .map(|course| standing(course, data.ledger.get(&course.code).unwrap_or_default()))
        .collect();

    SnapshotResponse {
        courses,
        feedback: live_feedback(data),
    }
}
