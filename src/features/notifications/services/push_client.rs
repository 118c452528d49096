use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::config::PushConfig;
use crate::core::error::{AppError, Result};

/// One notification to one delivery token.
///
/// Serialized in the provider's wire format (the token travels as `to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushJob {
    #[serde(rename = "to")]
    pub token: String,
    pub title: String,
    pub body: String,
}

/// Push provider boundary. Delivery is fire-and-forget: the contract ends
/// once the job has been handed over.
#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send(&self, job: &PushJob) -> Result<()>;
}

/// HTTP push client posting jobs to the configured provider endpoint
pub struct HttpPushClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPushClient {
    pub fn new(config: &PushConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to build push HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl PushClient for HttpPushClient {
    async fn send(&self, job: &PushJob) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(job)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Push provider error: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Push provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_serializes_in_provider_wire_format() {
        let job = PushJob {
            token: "ExponentPushToken[abc]".to_string(),
            title: "Report status updated".to_string(),
            body: "Your subscribed report \"Pothole\" is now in progress.".to_string(),
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["to"], "ExponentPushToken[abc]");
        assert_eq!(value["title"], "Report status updated");
        assert!(value.get("token").is_none());
    }
}
