pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{AppointmentFilter, AppointmentStatus};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("employee id is required for status transitions")]
    MissingEmployee,

    #[error("request to workshop backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("workshop backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Upstream workshop backend, as consumed by the dashboard. Handlers and
/// tests depend on this seam rather than on the HTTP implementation.
#[async_trait]
pub trait WorkshopApi: Send + Sync {
    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Value>, ApiError>;

    async fn get_appointment(&self, id: i64) -> Result<Value, ApiError>;

    /// Move appointment `id` to `target` on behalf of `employee_id`,
    /// returning the backend's response body as-is.
    async fn transition(
        &self,
        id: i64,
        target: AppointmentStatus,
        employee_id: &str,
    ) -> Result<Value, ApiError>;

    async fn list_service_records(&self) -> Result<Vec<Value>, ApiError>;

    async fn delete_project(&self, id: i64) -> Result<(), ApiError>;
}

/// Relative path of the action-style transition endpoint.
pub fn transition_path(id: i64, target: AppointmentStatus) -> String {
    format!("api/Appointments/{}/{}", id, target.action_verb())
}

/// Body sent with every transition request.
pub fn transition_body(id: i64, employee_id: &str) -> Value {
    serde_json::json!({ "appointmentID": id, "employeeID": employee_id })
}
