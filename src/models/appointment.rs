use serde::{Deserialize, Serialize};

/// Lifecycle label attached to every booking record. `Pending` is the
/// state a booking is created in; `Rejected` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::Rejected => "Rejected",
            AppointmentStatus::Completed => "Completed",
        }
    }

    /// Case-insensitive parse of a backend status label. Unknown labels
    /// return `None`; the raw label still reaches the UI via the view model.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(AppointmentStatus::Pending),
            "approved" => Some(AppointmentStatus::Approved),
            "rejected" => Some(AppointmentStatus::Rejected),
            "completed" => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }

    /// Path segment of the upstream action-style endpoint for reaching
    /// this status.
    pub fn action_verb(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "accept",
            AppointmentStatus::Rejected => "reject",
            AppointmentStatus::Completed => "complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Rejected | AppointmentStatus::Completed
        )
    }

    /// Pending → Approved | Rejected, Approved → Completed.
    pub fn can_transition_to(&self, target: AppointmentStatus) -> bool {
        matches!(
            (*self, target),
            (AppointmentStatus::Pending, AppointmentStatus::Approved)
                | (AppointmentStatus::Pending, AppointmentStatus::Rejected)
                | (AppointmentStatus::Approved, AppointmentStatus::Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentKind {
    Service,
    Project,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Service => "Service",
            AppointmentKind::Project => "Project",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "service" => Some(AppointmentKind::Service),
            "project" => Some(AppointmentKind::Project),
            _ => None,
        }
    }
}

/// Filter forwarded to the upstream appointments listing.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub kind: Option<AppointmentKind>,
    pub status: Option<AppointmentStatus>,
    pub q: Option<String>,
    pub employee_id: Option<String>,
}

impl AppointmentFilter {
    /// Query pairs in the upstream's parameter names.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.kind {
            query.push(("type", kind.as_str().to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(q) = &self.q {
            query.push(("q", q.clone()));
        }
        if let Some(id) = &self.employee_id {
            query.push(("employeeId", id.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_round_trip() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Approved,
            AppointmentStatus::Rejected,
            AppointmentStatus::Completed,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            AppointmentStatus::parse("  APPROVED "),
            Some(AppointmentStatus::Approved)
        );
        assert_eq!(AppointmentStatus::parse("on hold"), None);
    }

    #[test]
    fn test_action_verbs() {
        assert_eq!(AppointmentStatus::Approved.action_verb(), "accept");
        assert_eq!(AppointmentStatus::Rejected.action_verb(), "reject");
        assert_eq!(AppointmentStatus::Completed.action_verb(), "complete");
        assert_eq!(AppointmentStatus::Pending.action_verb(), "pending");
    }

    #[test]
    fn test_allowed_transitions() {
        use AppointmentStatus::*;

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Completed));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!AppointmentStatus::Pending.is_terminal());
        assert!(!AppointmentStatus::Approved.is_terminal());
        assert!(AppointmentStatus::Rejected.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = AppointmentFilter {
            kind: Some(AppointmentKind::Service),
            status: Some(AppointmentStatus::Pending),
            q: Some("golf".to_string()),
            employee_id: Some("emp-7".to_string()),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("type", "Service".to_string()),
                ("status", "Pending".to_string()),
                ("q", "golf".to_string()),
                ("employeeId", "emp-7".to_string()),
            ]
        );
        assert!(AppointmentFilter::default().to_query().is_empty());
    }
}
