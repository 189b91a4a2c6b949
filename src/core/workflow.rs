//! Workflow domain model and builder

use crate::core::graph;
use crate::core::step::Step;
use crate::core::validate::{self, ValidationError, ValidationReport};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while assembling a workflow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("duplicate step name '{0}'")]
    DuplicateStepName(String),

    #[error("step '{step}' depends on unknown step '{dependency}'")]
    UnknownDependency { step: String, dependency: String },
}

/// Execution mode declared to the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkflowKind {
    /// Steps run sequentially in declaration order
    Chain,

    /// Steps run according to explicit dependencies
    #[default]
    Graph,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Chain => "chain",
            WorkflowKind::Graph => "graph",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "chain" => Some(WorkflowKind::Chain),
            "graph" => Some(WorkflowKind::Graph),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared workflow parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            description: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            description: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// A named, ordered collection of steps plus top-level settings
///
/// Step order is insertion order; in chain mode that order is the
/// execution order the engine follows.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub name: String,
    pub description: Option<String>,
    pub kind: WorkflowKind,
    pub params: Vec<Param>,
    pub env: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
    steps: Vec<Step>,
}

impl Workflow {
    /// Create an empty workflow
    pub fn new(name: impl Into<String>, kind: WorkflowKind) -> Result<Self, BuildError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BuildError::Configuration(
                "workflow name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            description: None,
            kind,
            params: Vec::new(),
            env: BTreeMap::new(),
            timeout_secs: None,
            steps: Vec::new(),
        })
    }

    /// Start a fluent builder
    pub fn builder(name: impl Into<String>) -> WorkflowBuilder {
        WorkflowBuilder::new(name)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn contains_step(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.name == name)
    }

    /// Append a step
    ///
    /// Fails when the name is already taken or a dependency has not been
    /// added yet; the workflow is left unchanged on error.
    pub fn add_step(&mut self, step: Step) -> Result<(), BuildError> {
        if self.contains_step(&step.name) {
            return Err(BuildError::DuplicateStepName(step.name));
        }
        for dep in &step.depends {
            if !self.contains_step(dep) {
                return Err(BuildError::UnknownDependency {
                    step: step.name.clone(),
                    dependency: dep.clone(),
                });
            }
        }

        self.steps.push(step);
        Ok(())
    }

    /// Append without the fail-fast checks; callers run a full
    /// validation pass afterwards.
    pub(crate) fn push_step_unchecked(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Deterministic execution order; `Err` carries the dependency cycle
    pub fn execution_order(&self) -> Result<Vec<&str>, ValidationError> {
        graph::topological_order(&self.steps)
            .map_err(|cycle| ValidationError::CyclicDependency { cycle })
    }

    /// Run every structural check, collecting all errors and warnings
    pub fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }
}

/// Fluent workflow builder
///
/// Setters mutate the builder in place; `build` consumes it and runs
/// the same fail-fast checks as repeated `add_step` calls, so no
/// structurally broken workflow is ever handed out.
#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    name: String,
    description: Option<String>,
    kind: WorkflowKind,
    params: Vec<Param>,
    env: BTreeMap<String, String>,
    timeout_secs: Option<u64>,
    steps: Vec<Step>,
}

impl WorkflowBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: WorkflowKind::default(),
            params: Vec::new(),
            env: BTreeMap::new(),
            timeout_secs: None,
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn kind(mut self, kind: WorkflowKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for `kind(WorkflowKind::Chain)`
    pub fn chain(self) -> Self {
        self.kind(WorkflowKind::Chain)
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Workflow, BuildError> {
        let mut workflow = Workflow::new(self.name, self.kind)?;
        workflow.description = self.description;
        workflow.params = self.params;
        workflow.env = self.env;
        workflow.timeout_secs = self.timeout_secs;

        for step in self.steps {
            workflow.add_step(step)?;
        }

        Ok(workflow)
    }
}
