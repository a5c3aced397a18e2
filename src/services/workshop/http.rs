use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{transition_body, transition_path, ApiError, WorkshopApi};
use crate::models::{AppointmentFilter, AppointmentStatus};

pub struct HttpWorkshopApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWorkshopApi {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn status_error(resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let body = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            body
        };
        ApiError::Status {
            status: status.as_u16(),
            body,
        }
    }

    async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Self::status_error(resp).await)
        }
    }

    fn expect_array(value: Value) -> Result<Vec<Value>, ApiError> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Shape(format!("expected a JSON array, got: {other}"))),
        }
    }
}

#[async_trait]
impl WorkshopApi for HttpWorkshopApi {
    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Value>, ApiError> {
        let resp = self
            .client
            .get(self.url("api/Appointments"))
            .query(&filter.to_query())
            .send()
            .await?;
        Self::expect_array(Self::read_json(resp).await?)
    }

    async fn get_appointment(&self, id: i64) -> Result<Value, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("api/Appointments/{id}")))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn transition(
        &self,
        id: i64,
        target: AppointmentStatus,
        employee_id: &str,
    ) -> Result<Value, ApiError> {
        // precondition, checked before any network activity
        if employee_id.trim().is_empty() {
            return Err(ApiError::MissingEmployee);
        }

        tracing::info!(
            appointment = id,
            action = target.action_verb(),
            "requesting status transition"
        );

        let resp = self
            .client
            .put(self.url(&transition_path(id, target)))
            .header("X-Employee-ID", employee_id)
            .json(&transition_body(id, employee_id))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn list_service_records(&self) -> Result<Vec<Value>, ApiError> {
        let resp = self
            .client
            .get(self.url("api/Appointments/services"))
            .send()
            .await?;
        Self::expect_array(Self::read_json(resp).await?)
    }

    async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("api/Projects/{id}")))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::status_error(resp).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpWorkshopApi::new("http://backend:5000/".to_string(), Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            api.url(&transition_path(42, AppointmentStatus::Approved)),
            "http://backend:5000/api/Appointments/42/accept"
        );
    }

    #[test]
    fn test_expect_array_rejects_objects() {
        let err = HttpWorkshopApi::expect_array(serde_json::json!({"message": "nope"}));
        assert!(matches!(err, Err(ApiError::Shape(_))));
    }
}
