//! flowdag - workflow graph builder for remote execution engines

pub mod cli;
pub mod client;
pub mod core;
pub mod wire;

// Re-export commonly used types
pub use crate::client::{
    EngineBackend, EngineClientConfig, EngineError, HttpEngineClient, SubmitReceipt,
};
pub use crate::core::condition::{ContinueOn, Precondition, RetryPolicy};
pub use crate::core::executor::{
    AgentExec, ArgType, CommandExec, Executor, FileMount, HttpExec, SubDagExec, ToolArg, ToolDef,
    ToolExec, VolumeMount,
};
pub use crate::core::step::{Step, StepBuilder};
pub use crate::core::validate::{ValidationError, ValidationReport, ValidationWarning};
pub use crate::core::workflow::{BuildError, Param, Workflow, WorkflowBuilder, WorkflowKind};
pub use crate::wire::WireError;
