//! HTTP engine client

use super::{EngineBackend, EngineError, SubmitReceipt};
use crate::core::workflow::Workflow;
use crate::wire;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Configuration for the engine client
#[derive(Debug, Clone)]
pub struct EngineClientConfig {
    /// Engine base URL
    pub endpoint: String,

    /// Bearer token, when the engine requires one
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EngineClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Engine client that POSTs serialized workflows over HTTP
#[derive(Debug, Clone)]
pub struct HttpEngineClient {
    config: EngineClientConfig,
    http: reqwest::Client,
}

impl HttpEngineClient {
    pub fn new(config: EngineClientConfig) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    fn submit_url(&self) -> String {
        format!(
            "{}/api/v1/workflows",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl EngineBackend for HttpEngineClient {
    async fn submit(&self, workflow: &Workflow) -> Result<SubmitReceipt, EngineError> {
        let request_id = Uuid::new_v4();
        let doc = wire::to_doc(workflow)?;

        debug!(%request_id, workflow = %workflow.name, "submitting workflow");

        let mut request = self.http.post(self.submit_url()).json(&doc);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EngineError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let run_id = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("runId").and_then(|id| id.as_str()).map(str::to_string));

        debug!(%request_id, ?run_id, "workflow accepted");

        Ok(SubmitReceipt {
            request_id,
            workflow_name: workflow.name.clone(),
            submitted_at: Utc::now(),
            run_id,
        })
    }
}
