//! Executor variants for workflow steps
//!
//! Each executor kind carries exactly one configuration payload. The
//! payloads are plain data; nothing here is executed locally.

use crate::core::workflow::Workflow;
use std::collections::BTreeMap;

/// How a step runs
#[derive(Debug, Clone, PartialEq)]
pub enum Executor {
    /// Inline shell script inside a container image
    Command(CommandExec),

    /// Platform-internal REST call against the orchestration backend
    Http(HttpExec),

    /// Self-contained tool invocation
    Tool(ToolExec),

    /// Delegation to an LLM-backed agent
    Agent(AgentExec),

    /// Nested sub-workflow
    SubDag(SubDagExec),
}

impl Executor {
    /// Wire discriminator for this executor kind
    pub fn kind(&self) -> &'static str {
        match self {
            Executor::Command(_) => "command",
            Executor::Http(_) => "http",
            Executor::Tool(_) => "tool",
            Executor::Agent(_) => "agent",
            Executor::SubDag(_) => "dag",
        }
    }
}

/// Shell script plus environment, run inside a named image
#[derive(Debug, Clone, PartialEq)]
pub struct CommandExec {
    pub image: String,
    pub script: String,
    pub env: BTreeMap<String, String>,
}

impl CommandExec {
    pub fn new(image: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            script: script.into(),
            env: BTreeMap::new(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// REST call described by method and relative URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExec {
    pub method: String,
    pub url: String,
}

impl HttpExec {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }
}

/// Declared type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Str,
    Int,
    Bool,
}

impl ArgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::Str => "string",
            ArgType::Int => "integer",
            ArgType::Bool => "boolean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "string" => Some(ArgType::Str),
            "integer" => Some(ArgType::Int),
            "boolean" => Some(ArgType::Bool),
            _ => None,
        }
    }
}

/// Typed argument declaration on a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolArg {
    pub name: String,
    pub arg_type: ArgType,
    pub description: Option<String>,
    pub required: bool,
}

impl ToolArg {
    pub fn required(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            description: None,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            description: None,
            required: false,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// File copied into the tool container before it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMount {
    pub source: String,
    pub destination: String,
}

/// Named volume mounted into the tool container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub name: String,
    pub path: String,
}

/// A self-contained executable unit
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDef {
    pub name: String,
    pub image: String,
    pub content: String,
    pub args: Vec<ToolArg>,
    pub with_files: Vec<FileMount>,
    pub with_volumes: Vec<VolumeMount>,
    pub secrets: Vec<String>,
}

impl ToolDef {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            content: content.into(),
            args: Vec::new(),
            with_files: Vec::new(),
            with_volumes: Vec::new(),
            secrets: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: ToolArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_file(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.with_files.push(FileMount {
            source: source.into(),
            destination: destination.into(),
        });
        self
    }

    pub fn with_volume(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.with_volumes.push(VolumeMount {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    pub fn secret(mut self, name: impl Into<String>) -> Self {
        self.secrets.push(name.into());
        self
    }
}

/// A tool definition invoked with a concrete argument map
#[derive(Debug, Clone, PartialEq)]
pub struct ToolExec {
    pub tool: ToolDef,
    pub args: BTreeMap<String, serde_json::Value>,
}

impl ToolExec {
    pub fn new(tool: ToolDef) -> Self {
        Self {
            tool,
            args: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// Instruction handed to an LLM-backed agent
///
/// The model is always named explicitly; there is no ambient default.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentExec {
    pub name: String,
    pub message: String,
    pub model: String,
    pub tools: Vec<ToolDef>,
}

impl AgentExec {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            model: model.into(),
            tools: Vec::new(),
        }
    }

    pub fn tool(mut self, tool: ToolDef) -> Self {
        self.tools.push(tool);
        self
    }
}

/// A step that is itself a workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SubDagExec {
    pub workflow: Box<Workflow>,
}

impl SubDagExec {
    pub fn new(workflow: Workflow) -> Self {
        Self {
            workflow: Box::new(workflow),
        }
    }
}
