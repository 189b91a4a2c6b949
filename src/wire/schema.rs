//! Serde document types for the engine wire format
//!
//! These mirror the transport schema exactly (camelCase keys, a
//! `{type, config}` executor envelope) and stay separate from the
//! domain model so either side can evolve independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level workflow document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Execution mode: "chain" or "graph"
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<u64>,

    #[serde(default)]
    pub steps: Vec<StepDoc>,
}

/// Declared workflow parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One step document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub executor: ExecutorDoc,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<PreconditionDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicyDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_on: Option<ContinueOnDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<u64>,
}

/// Executor envelope: a discriminator plus a config whose shape the
/// discriminator selects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorDoc {
    #[serde(rename = "type")]
    pub kind: String,

    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreconditionDoc {
    pub condition: String,
    pub expected: String,
}

/// Signed on the wire so out-of-range values decode and get reported
/// as policy errors instead of opaque parse failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicyDoc {
    pub limit: i64,
    pub interval_sec: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueOnDoc {
    pub failure: bool,
}

/// Config payload for `type: command`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandConfigDoc {
    pub image: String,
    pub script: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Config payload for `type: http`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfigDoc {
    pub method: String,
    pub url: String,
}

/// Config payload for `type: tool`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfigDoc {
    pub tool: ToolDefDoc,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefDoc {
    pub name: String,
    pub image: String,
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ToolArgDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub with_files: Vec<FileMountDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub with_volumes: Vec<VolumeMountDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolArgDoc {
    pub name: String,

    /// "string", "integer" or "boolean"
    #[serde(rename = "type")]
    pub arg_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMountDoc {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMountDoc {
    pub name: String,
    pub path: String,
}

/// Config payload for `type: agent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfigDoc {
    pub name: String,
    pub message: String,
    pub model: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefDoc>,
}

/// Config payload for `type: dag`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagConfigDoc {
    pub workflow: WorkflowDoc,
}
