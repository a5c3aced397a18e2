use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AppointmentFilter, AppointmentKind, AppointmentStatus, AppointmentView};
use crate::services::normalize;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Acting employee: `X-Employee-ID` header, falling back to the
/// configured default. No id means no transition.
fn resolve_employee(headers: &HeaderMap, fallback: &str) -> Result<String, AppError> {
    let header_id = headers
        .get("x-employee-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match header_id {
        Some(id) => Ok(id.to_string()),
        None if !fallback.trim().is_empty() => Ok(fallback.trim().to_string()),
        None => Err(AppError::MissingEmployee),
    }
}

// GET /api/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    #[serde(alias = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    #[serde(alias = "employeeId")]
    pub employee_id: Option<String>,
}

impl AppointmentsQuery {
    fn into_filter(self) -> Result<AppointmentFilter, AppError> {
        let kind = match self.kind.as_deref() {
            Some(s) => Some(
                AppointmentKind::parse(s).ok_or_else(|| AppError::UnknownKind(s.to_string()))?,
            ),
            None => None,
        };
        let status = match self.status.as_deref() {
            Some(s) => Some(
                AppointmentStatus::parse(s)
                    .ok_or_else(|| AppError::UnknownStatus(s.to_string()))?,
            ),
            None => None,
        };
        Ok(AppointmentFilter {
            kind,
            status,
            q: self.q,
            employee_id: self.employee_id,
        })
    }
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentView>>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;

    let filter = query.into_filter()?;
    let records = state.api.list_appointments(&filter).await?;

    let mut views: Vec<AppointmentView> =
        records.iter().map(normalize::normalize_appointment).collect();
    // unparsable schedule times sort last
    views.sort_by_key(|v| (v.scheduled_time.is_none(), v.scheduled_time));

    Ok(Json(views))
}

// GET /api/appointments/stats
#[derive(Serialize)]
pub struct StatsResponse {
    total: usize,
    pending: usize,
    approved: usize,
    rejected: usize,
    completed: usize,
}

pub async fn appointment_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;

    let records = state
        .api
        .list_appointments(&AppointmentFilter::default())
        .await?;

    let mut stats = StatsResponse {
        total: records.len(),
        pending: 0,
        approved: 0,
        rejected: 0,
        completed: 0,
    };
    for record in &records {
        match normalize::normalize_appointment(record).status {
            Some(AppointmentStatus::Pending) => stats.pending += 1,
            Some(AppointmentStatus::Approved) => stats.approved += 1,
            Some(AppointmentStatus::Rejected) => stats.rejected += 1,
            Some(AppointmentStatus::Completed) => stats.completed += 1,
            None => {}
        }
    }

    Ok(Json(stats))
}

// GET /api/appointments/services
pub async fn list_service_records(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AppointmentView>>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;

    // dashboard read path: a failed upstream call degrades to an empty list
    let records = match state.api.list_service_records().await {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!("failed to load service records: {err}");
            Vec::new()
        }
    };

    let views: Vec<AppointmentView> =
        records.iter().map(normalize::normalize_appointment).collect();
    Ok(Json(views))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentView>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;

    let record = state.api.get_appointment(id).await?;
    Ok(Json(normalize::normalize_appointment(&record)))
}

// POST /api/appointments/:id/approve
pub async fn approve_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentView>, AppError> {
    apply_transition(state, headers, id, AppointmentStatus::Approved).await
}

// POST /api/appointments/:id/reject
pub async fn reject_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentView>, AppError> {
    apply_transition(state, headers, id, AppointmentStatus::Rejected).await
}

// POST /api/appointments/:id/complete
pub async fn complete_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentView>, AppError> {
    apply_transition(state, headers, id, AppointmentStatus::Completed).await
}

async fn apply_transition(
    state: Arc<AppState>,
    headers: HeaderMap,
    id: i64,
    target: AppointmentStatus,
) -> Result<Json<AppointmentView>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;
    let employee_id = resolve_employee(&headers, &state.config.default_employee_id)?;

    let current = state.api.get_appointment(id).await?;
    let view = normalize::normalize_appointment(&current);
    if let Some(status) = view.status {
        if !status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
    }

    state.api.transition(id, target, &employee_id).await?;

    // answer with the stored record, not an optimistic patch
    let refreshed = state.api.get_appointment(id).await?;
    Ok(Json(normalize::normalize_appointment(&refreshed)))
}

// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.dashboard_token)?;

    state.api.delete_project(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
