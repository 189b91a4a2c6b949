//! Wire format: mapping between the domain model and the engine document
//!
//! Encoding is deterministic (step order is insertion order, maps are
//! sorted), so serializing the same workflow twice yields byte-identical
//! documents. Decoding collects every structural problem it can find
//! before rejecting, and a decoded workflow has always passed the full
//! validation pass.

pub mod schema;

use crate::core::condition::{ContinueOn, Precondition, RetryPolicy};
use crate::core::executor::{
    AgentExec, ArgType, CommandExec, Executor, FileMount, HttpExec, SubDagExec, ToolArg,
    ToolDef, ToolExec, VolumeMount,
};
use crate::core::step::Step;
use crate::core::validate::{ValidationError, ValidationReport};
use crate::core::workflow::{Param, Workflow, WorkflowKind};
use schema::{
    AgentConfigDoc, CommandConfigDoc, ContinueOnDoc, DagConfigDoc, ExecutorDoc, FileMountDoc,
    HttpConfigDoc, ParamDoc, PreconditionDoc, RetryPolicyDoc, StepDoc, ToolArgDoc,
    ToolConfigDoc, ToolDefDoc, VolumeMountDoc, WorkflowDoc,
};
use thiserror::Error;

/// Wire-level failures
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document failed validation:\n{0}")]
    Invalid(ValidationReport),
}

/// Map a workflow to its wire document
pub fn to_doc(workflow: &Workflow) -> Result<WorkflowDoc, WireError> {
    let steps = workflow
        .steps()
        .iter()
        .map(step_to_doc)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkflowDoc {
        name: workflow.name.clone(),
        description: workflow.description.clone(),
        kind: workflow.kind.as_str().to_string(),
        params: workflow.params.iter().map(param_to_doc).collect(),
        env: workflow.env.clone(),
        timeout_sec: workflow.timeout_secs,
        steps,
    })
}

/// Serialize to the YAML transport document
pub fn encode_yaml(workflow: &Workflow) -> Result<String, WireError> {
    Ok(serde_yaml::to_string(&to_doc(workflow)?)?)
}

/// Serialize to the compact JSON payload sent to the engine
pub fn encode_json(workflow: &Workflow) -> Result<String, WireError> {
    Ok(serde_json::to_string(&to_doc(workflow)?)?)
}

/// Serialize to human-readable JSON
pub fn encode_json_pretty(workflow: &Workflow) -> Result<String, WireError> {
    Ok(serde_json::to_string_pretty(&to_doc(workflow)?)?)
}

/// Parse a YAML document and rebuild the workflow
pub fn decode_yaml(input: &str) -> Result<Workflow, WireError> {
    let doc: WorkflowDoc = serde_yaml::from_str(input)?;
    from_doc(&doc)
}

/// Parse a JSON document and rebuild the workflow
pub fn decode_json(input: &str) -> Result<Workflow, WireError> {
    let doc: WorkflowDoc = serde_json::from_str(input)?;
    from_doc(&doc)
}

/// Rebuild a workflow from its wire document
///
/// Structural conversion problems across all steps are collected first;
/// the assembled workflow must then pass the full validation pass.
pub fn from_doc(doc: &WorkflowDoc) -> Result<Workflow, WireError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    let kind = match WorkflowKind::parse(&doc.kind) {
        Some(kind) => kind,
        None => {
            errors.push(ValidationError::Configuration {
                detail: format!("unknown workflow type '{}'", doc.kind),
            });
            WorkflowKind::Graph
        }
    };

    if doc.name.trim().is_empty() {
        errors.push(ValidationError::Configuration {
            detail: "workflow name must not be empty".to_string(),
        });
    }

    let mut steps = Vec::with_capacity(doc.steps.len());
    for step_doc in &doc.steps {
        match step_from_doc(step_doc) {
            Ok(step) => steps.push(step),
            Err(step_errors) => errors.extend(step_errors),
        }
    }

    if !errors.is_empty() {
        return Err(WireError::Invalid(ValidationReport {
            errors,
            warnings: Vec::new(),
        }));
    }

    let mut workflow = Workflow::new(doc.name.clone(), kind).map_err(|err| {
        WireError::Invalid(ValidationReport {
            errors: vec![ValidationError::Configuration {
                detail: err.to_string(),
            }],
            warnings: Vec::new(),
        })
    })?;
    workflow.description = doc.description.clone();
    workflow.timeout_secs = doc.timeout_sec;
    workflow.env = doc.env.clone();
    workflow.params = doc
        .params
        .iter()
        .map(|p| Param {
            name: p.name.clone(),
            default: p.default.clone(),
            description: p.description.clone(),
        })
        .collect();
    for step in steps {
        workflow.push_step_unchecked(step);
    }

    let report = workflow.validate();
    if !report.is_ok() {
        return Err(WireError::Invalid(report));
    }

    Ok(workflow)
}

fn param_to_doc(param: &Param) -> ParamDoc {
    ParamDoc {
        name: param.name.clone(),
        default: param.default.clone(),
        description: param.description.clone(),
    }
}

fn step_to_doc(step: &Step) -> Result<StepDoc, WireError> {
    Ok(StepDoc {
        name: step.name.clone(),
        description: step.description.clone(),
        executor: executor_to_doc(&step.executor)?,
        depends: step.depends.clone(),
        output: step.output.clone(),
        preconditions: step
            .preconditions
            .iter()
            .map(|p| PreconditionDoc {
                condition: p.condition.clone(),
                expected: p.expected.clone(),
            })
            .collect(),
        retry_policy: step.retry.map(|r| RetryPolicyDoc {
            limit: i64::from(r.limit),
            interval_sec: i64::from(r.interval_secs),
        }),
        continue_on: step.continue_on.map(|c| ContinueOnDoc { failure: c.failure }),
        timeout_sec: step.timeout_secs,
    })
}

fn executor_to_doc(executor: &Executor) -> Result<ExecutorDoc, WireError> {
    let config = match executor {
        Executor::Command(command) => serde_json::to_value(CommandConfigDoc {
            image: command.image.clone(),
            script: command.script.clone(),
            env: command.env.clone(),
        })?,
        Executor::Http(http) => serde_json::to_value(HttpConfigDoc {
            method: http.method.clone(),
            url: http.url.clone(),
        })?,
        Executor::Tool(tool) => serde_json::to_value(ToolConfigDoc {
            tool: tool_def_to_doc(&tool.tool),
            args: tool.args.clone(),
        })?,
        Executor::Agent(agent) => serde_json::to_value(AgentConfigDoc {
            name: agent.name.clone(),
            message: agent.message.clone(),
            model: agent.model.clone(),
            tools: agent.tools.iter().map(tool_def_to_doc).collect(),
        })?,
        Executor::SubDag(dag) => serde_json::to_value(DagConfigDoc {
            workflow: to_doc(&dag.workflow)?,
        })?,
    };

    Ok(ExecutorDoc {
        kind: executor.kind().to_string(),
        config,
    })
}

fn tool_def_to_doc(tool: &ToolDef) -> ToolDefDoc {
    ToolDefDoc {
        name: tool.name.clone(),
        image: tool.image.clone(),
        content: tool.content.clone(),
        args: tool
            .args
            .iter()
            .map(|a| ToolArgDoc {
                name: a.name.clone(),
                arg_type: a.arg_type.as_str().to_string(),
                description: a.description.clone(),
                required: a.required,
            })
            .collect(),
        with_files: tool
            .with_files
            .iter()
            .map(|f| FileMountDoc {
                source: f.source.clone(),
                destination: f.destination.clone(),
            })
            .collect(),
        with_volumes: tool
            .with_volumes
            .iter()
            .map(|v| VolumeMountDoc {
                name: v.name.clone(),
                path: v.path.clone(),
            })
            .collect(),
        secrets: tool.secrets.clone(),
    }
}

fn step_from_doc(doc: &StepDoc) -> Result<Step, Vec<ValidationError>> {
    let executor = executor_from_doc(&doc.name, &doc.executor);
    let retry = match &doc.retry_policy {
        Some(policy) => retry_from_doc(&doc.name, policy).map(Some),
        None => Ok(None),
    };

    match (executor, retry) {
        (Ok(executor), Ok(retry)) => Ok(Step {
            name: doc.name.clone(),
            description: doc.description.clone(),
            executor,
            depends: doc.depends.clone(),
            output: doc.output.clone(),
            preconditions: doc
                .preconditions
                .iter()
                .map(|p| Precondition::new(p.condition.clone(), p.expected.clone()))
                .collect(),
            retry,
            continue_on: doc.continue_on.as_ref().map(|c| ContinueOn { failure: c.failure }),
            timeout_secs: doc.timeout_sec,
        }),
        (executor, retry) => {
            let mut errors = Vec::new();
            if let Err(error) = executor {
                errors.push(error);
            }
            if let Err(retry_errors) = retry {
                errors.extend(retry_errors);
            }
            Err(errors)
        }
    }
}

fn retry_from_doc(step: &str, doc: &RetryPolicyDoc) -> Result<RetryPolicy, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let invalid = |detail: String| ValidationError::InvalidPolicyValue {
        step: step.to_string(),
        detail,
    };

    if doc.limit < 0 {
        errors.push(invalid(format!(
            "retry limit must not be negative (got {})",
            doc.limit
        )));
    }
    if doc.interval_sec < 0 {
        errors.push(invalid(format!(
            "retry interval must not be negative (got {})",
            doc.interval_sec
        )));
    }
    if doc.limit > i64::from(u32::MAX) || doc.interval_sec > i64::from(u32::MAX) {
        errors.push(invalid("retry policy value out of range".to_string()));
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(RetryPolicy::new(doc.limit as u32, doc.interval_sec as u32))
}

fn executor_from_doc(step: &str, doc: &ExecutorDoc) -> Result<Executor, ValidationError> {
    let mismatch = |detail: String| ValidationError::ExecutorConfigMismatch {
        step: step.to_string(),
        detail,
    };

    match doc.kind.as_str() {
        "command" => {
            let config: CommandConfigDoc = serde_json::from_value(doc.config.clone())
                .map_err(|e| mismatch(format!("command config: {e}")))?;
            Ok(Executor::Command(CommandExec {
                image: config.image,
                script: config.script,
                env: config.env,
            }))
        }
        "http" => {
            let config: HttpConfigDoc = serde_json::from_value(doc.config.clone())
                .map_err(|e| mismatch(format!("http config: {e}")))?;
            Ok(Executor::Http(HttpExec {
                method: config.method,
                url: config.url,
            }))
        }
        "tool" => {
            let config: ToolConfigDoc = serde_json::from_value(doc.config.clone())
                .map_err(|e| mismatch(format!("tool config: {e}")))?;
            Ok(Executor::Tool(ToolExec {
                tool: tool_def_from_doc(step, &config.tool)?,
                args: config.args,
            }))
        }
        "agent" => {
            let config: AgentConfigDoc = serde_json::from_value(doc.config.clone())
                .map_err(|e| mismatch(format!("agent config: {e}")))?;
            let mut tools = Vec::with_capacity(config.tools.len());
            for tool in &config.tools {
                tools.push(tool_def_from_doc(step, tool)?);
            }
            Ok(Executor::Agent(AgentExec {
                name: config.name,
                message: config.message,
                model: config.model,
                tools,
            }))
        }
        "dag" => {
            let config: DagConfigDoc = serde_json::from_value(doc.config.clone())
                .map_err(|e| mismatch(format!("dag config: {e}")))?;
            let workflow = from_doc(&config.workflow)
                .map_err(|e| mismatch(format!("nested workflow: {e}")))?;
            Ok(Executor::SubDag(SubDagExec::new(workflow)))
        }
        other => Err(mismatch(format!("unknown executor type '{other}'"))),
    }
}

fn tool_def_from_doc(step: &str, doc: &ToolDefDoc) -> Result<ToolDef, ValidationError> {
    let mut args = Vec::with_capacity(doc.args.len());
    for arg in &doc.args {
        let arg_type = ArgType::parse(&arg.arg_type).ok_or_else(|| {
            ValidationError::ExecutorConfigMismatch {
                step: step.to_string(),
                detail: format!(
                    "tool '{}': unknown argument type '{}'",
                    doc.name, arg.arg_type
                ),
            }
        })?;
        args.push(ToolArg {
            name: arg.name.clone(),
            arg_type,
            description: arg.description.clone(),
            required: arg.required,
        });
    }

    Ok(ToolDef {
        name: doc.name.clone(),
        image: doc.image.clone(),
        content: doc.content.clone(),
        args,
        with_files: doc
            .with_files
            .iter()
            .map(|f| FileMount {
                source: f.source.clone(),
                destination: f.destination.clone(),
            })
            .collect(),
        with_volumes: doc
            .with_volumes
            .iter()
            .map(|v| VolumeMount {
                name: v.name.clone(),
                path: v.path.clone(),
            })
            .collect(),
        secrets: doc.secrets.clone(),
    })
}
