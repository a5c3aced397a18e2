use chrono::NaiveDateTime;
use serde::Serialize;

use super::{AppointmentKind, AppointmentStatus};

/// One named, priced line item of an appointment's service breakdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceLine {
    pub title: String,
    pub price: Option<f64>,
}

/// Flat, UI-friendly shape of a raw upstream appointment record.
///
/// Every field except `id` is optional: the normalizer represents absence
/// as `None` and never raises. `status_label` keeps the backend's raw
/// label even when it does not parse into [`AppointmentStatus`].
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    pub id: Option<i64>,
    pub kind: Option<AppointmentKind>,
    pub status: Option<AppointmentStatus>,
    pub status_label: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_model: Option<String>,
    pub scheduled_at: Option<String>,
    pub completed_at: Option<String>,
    pub total_price: Option<f64>,
    pub services: Option<String>,
    pub service_lines: Vec<ServiceLine>,
    /// Best-effort parse of `scheduled_at`, used for ordering only.
    #[serde(skip)]
    pub scheduled_time: Option<NaiveDateTime>,
}
