//! Engine submission client
//!
//! The execution engine is an external service; this module only hands
//! a serialized workflow document to it and records a receipt. Running
//! steps, retries, and cancellation all happen engine-side.

pub mod http;

use crate::core::workflow::Workflow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use http::{EngineClientConfig, HttpEngineClient};

/// Error types for engine submission
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to encode workflow: {0}")]
    Encode(#[from] crate::wire::WireError),

    #[error("engine rejected the workflow: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Receipt returned once the engine accepted a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Client-generated correlation id
    pub request_id: Uuid,

    /// Name of the submitted workflow
    pub workflow_name: String,

    /// When the submission was acknowledged
    pub submitted_at: DateTime<Utc>,

    /// Run id assigned by the engine, when the response carries one
    pub run_id: Option<String>,
}

/// Trait for engine backends - allows for different implementations
#[async_trait]
pub trait EngineBackend: Send + Sync {
    /// Submit a workflow for execution
    async fn submit(&self, workflow: &Workflow) -> Result<SubmitReceipt, EngineError>;
}
