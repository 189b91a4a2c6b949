//! Structural validation over an assembled workflow
//!
//! Unlike the fail-fast builder checks, everything here is collected
//! into a single report so one pass surfaces every problem at once.

use crate::core::executor::{Executor, ToolDef, ToolExec};
use crate::core::graph;
use crate::core::step::Step;
use crate::core::workflow::{Workflow, WorkflowKind};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// A rule violation that blocks serialization and submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("configuration: {detail}")]
    Configuration { detail: String },

    #[error("duplicate step name '{name}'")]
    DuplicateStepName { name: String },

    #[error("duplicate parameter name '{name}'")]
    DuplicateParamName { name: String },

    #[error("step '{step}' depends on unknown step '{dependency}'")]
    UnknownDependency { step: String, dependency: String },

    #[error("dependency cycle: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("chain workflow: step '{step}' depends on later step '{dependency}'")]
    ChainOrder { step: String, dependency: String },

    #[error("step '{step}': executor config mismatch: {detail}")]
    ExecutorConfigMismatch { step: String, detail: String },

    #[error("step '{step}': invalid policy value: {detail}")]
    InvalidPolicyValue { step: String, detail: String },
}

/// Advisory finding; never blocks serialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("workflow has no steps")]
    EmptyWorkflow,

    #[error("step '{step}' has no dependents and no declared output")]
    DanglingStep { step: String },

    #[error("step '{step}' lists dependency '{dependency}' more than once")]
    DuplicateDependency { step: String, dependency: String },
}

/// Everything a single validation pass found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "error: {}", error)?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {}", warning)?;
        }
        Ok(())
    }
}

/// Check every structural rule over the workflow
pub fn validate(workflow: &Workflow) -> ValidationReport {
    let mut report = ValidationReport::default();

    if workflow.name.trim().is_empty() {
        report.errors.push(ValidationError::Configuration {
            detail: "workflow name must not be empty".to_string(),
        });
    }

    let mut seen_params = HashSet::new();
    for param in &workflow.params {
        if !seen_params.insert(param.name.as_str()) {
            report.errors.push(ValidationError::DuplicateParamName {
                name: param.name.clone(),
            });
        }
    }

    let steps = workflow.steps();
    if steps.is_empty() {
        report.warnings.push(ValidationWarning::EmptyWorkflow);
    }

    let mut seen_steps = HashSet::new();
    for step in steps {
        if !seen_steps.insert(step.name.as_str()) {
            report.errors.push(ValidationError::DuplicateStepName {
                name: step.name.clone(),
            });
        }
    }

    let positions: HashMap<&str, usize> = steps
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), i))
        .collect();

    for (index, step) in steps.iter().enumerate() {
        let mut seen_deps = HashSet::new();
        for dep in &step.depends {
            match positions.get(dep.as_str()) {
                None => report.errors.push(ValidationError::UnknownDependency {
                    step: step.name.clone(),
                    dependency: dep.clone(),
                }),
                Some(&pos) => {
                    // Chain mode runs in declaration order, so explicit
                    // dependencies may only point backwards.
                    if workflow.kind == WorkflowKind::Chain && pos >= index {
                        report.errors.push(ValidationError::ChainOrder {
                            step: step.name.clone(),
                            dependency: dep.clone(),
                        });
                    }
                }
            }
            if !seen_deps.insert(dep.as_str()) {
                report.warnings.push(ValidationWarning::DuplicateDependency {
                    step: step.name.clone(),
                    dependency: dep.clone(),
                });
            }
        }

        check_executor(&step.name, &step.executor, &mut report);
        check_preconditions(step, &mut report);
    }

    if let Some(cycle) = graph::find_cycle(steps) {
        report
            .errors
            .push(ValidationError::CyclicDependency { cycle });
    }

    // Output consumption happens through engine-side token substitution,
    // which the builder cannot see. The advisory is structural only and
    // limited to graph mode, where dependents are explicit.
    if workflow.kind == WorkflowKind::Graph {
        let mut has_dependents: HashSet<&str> = HashSet::new();
        for step in steps {
            for dep in &step.depends {
                has_dependents.insert(dep.as_str());
            }
        }
        for step in steps {
            if step.output.is_none() && !has_dependents.contains(step.name.as_str()) {
                report.warnings.push(ValidationWarning::DanglingStep {
                    step: step.name.clone(),
                });
            }
        }
    }

    report
}

fn mismatch(report: &mut ValidationReport, step: &str, detail: impl Into<String>) {
    report.errors.push(ValidationError::ExecutorConfigMismatch {
        step: step.to_string(),
        detail: detail.into(),
    });
}

fn check_executor(step: &str, executor: &Executor, report: &mut ValidationReport) {
    match executor {
        Executor::Command(command) => {
            if command.image.trim().is_empty() {
                mismatch(report, step, "command executor requires a container image");
            }
            if command.script.trim().is_empty() {
                mismatch(report, step, "command executor requires a script body");
            }
        }
        Executor::Http(http) => {
            if http.method.trim().is_empty() {
                mismatch(report, step, "http executor requires a method");
            }
            if http.url.trim().is_empty() {
                mismatch(report, step, "http executor requires a url");
            }
        }
        Executor::Tool(tool) => check_tool_call(step, tool, report),
        Executor::Agent(agent) => {
            if agent.name.trim().is_empty() {
                mismatch(report, step, "agent executor requires a name");
            }
            if agent.message.trim().is_empty() {
                mismatch(report, step, "agent executor requires a message");
            }
            if agent.model.trim().is_empty() {
                mismatch(report, step, "agent executor requires a model");
            }
            for tool in &agent.tools {
                check_tool_def(step, tool, report);
            }
        }
        Executor::SubDag(dag) => {
            let inner = validate(&dag.workflow);
            for error in inner.errors {
                mismatch(
                    report,
                    step,
                    format!("nested workflow '{}': {}", dag.workflow.name, error),
                );
            }
        }
    }
}

fn check_tool_def(step: &str, tool: &ToolDef, report: &mut ValidationReport) {
    if tool.name.trim().is_empty() {
        mismatch(report, step, "tool definition requires a name");
    }
    if tool.image.trim().is_empty() {
        mismatch(
            report,
            step,
            format!("tool '{}' requires a container image", tool.name),
        );
    }
    if tool.content.trim().is_empty() {
        mismatch(
            report,
            step,
            format!("tool '{}' requires a script body", tool.name),
        );
    }

    let mut seen = HashSet::new();
    for arg in &tool.args {
        if !seen.insert(arg.name.as_str()) {
            mismatch(
                report,
                step,
                format!(
                    "tool '{}' declares argument '{}' more than once",
                    tool.name, arg.name
                ),
            );
        }
    }
}

fn check_tool_call(step: &str, exec: &ToolExec, report: &mut ValidationReport) {
    check_tool_def(step, &exec.tool, report);

    let declared: HashSet<&str> = exec.tool.args.iter().map(|a| a.name.as_str()).collect();
    for key in exec.args.keys() {
        if !declared.contains(key.as_str()) {
            mismatch(
                report,
                step,
                format!("argument '{}' is not declared by tool '{}'", key, exec.tool.name),
            );
        }
    }
    for arg in &exec.tool.args {
        if arg.required && !exec.args.contains_key(&arg.name) {
            mismatch(
                report,
                step,
                format!(
                    "required argument '{}' of tool '{}' is missing",
                    arg.name, exec.tool.name
                ),
            );
        }
    }
}

fn check_preconditions(step: &Step, report: &mut ValidationReport) {
    for precondition in &step.preconditions {
        if precondition.condition.trim().is_empty() {
            report.errors.push(ValidationError::InvalidPolicyValue {
                step: step.name.clone(),
                detail: "precondition condition must not be empty".to_string(),
            });
        }
        if precondition.expected.trim().is_empty() {
            report.errors.push(ValidationError::InvalidPolicyValue {
                step: step.name.clone(),
                detail: "precondition expected pattern must not be empty".to_string(),
            });
        }
    }
}
