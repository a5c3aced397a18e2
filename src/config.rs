use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub workshop_api_url: String,
    pub dashboard_token: String,
    pub default_employee_id: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            workshop_api_url: env::var("WORKSHOP_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            dashboard_token: env::var("DASHBOARD_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            default_employee_id: env::var("DEFAULT_EMPLOYEE_ID").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }
}
