//! Step domain model

use crate::core::condition::{ContinueOn, Precondition, RetryPolicy};
use crate::core::executor::Executor;

/// A single node in the workflow graph
///
/// Steps are immutable once added to a workflow; changing one means
/// rebuilding the workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Unique step name
    pub name: String,

    /// Human-readable description
    pub description: Option<String>,

    /// How this step runs
    pub executor: Executor,

    /// Names of steps that must complete first
    pub depends: Vec<String>,

    /// Variable name under which the engine publishes this step's result
    pub output: Option<String>,

    /// Gates the engine evaluates before execution
    pub preconditions: Vec<Precondition>,

    /// Retry policy on failure
    pub retry: Option<RetryPolicy>,

    /// Whether dependents may proceed past a failure
    pub continue_on: Option<ContinueOn>,

    /// Execution timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Step {
    /// Create a step with only a name and executor
    pub fn new(name: impl Into<String>, executor: Executor) -> Self {
        Self {
            name: name.into(),
            description: None,
            executor,
            depends: Vec::new(),
            output: None,
            preconditions: Vec::new(),
            retry: None,
            continue_on: None,
            timeout_secs: None,
        }
    }

    /// Start a fluent builder
    pub fn builder(name: impl Into<String>, executor: Executor) -> StepBuilder {
        StepBuilder {
            step: Step::new(name, executor),
        }
    }
}

/// Fluent builder for a step
#[derive(Debug, Clone)]
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.step.description = Some(text.into());
        self
    }

    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.step.depends.push(name.into());
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.step.output = Some(name.into());
        self
    }

    pub fn precondition(
        mut self,
        condition: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        self.step
            .preconditions
            .push(Precondition::new(condition, expected));
        self
    }

    pub fn retry(mut self, limit: u32, interval_secs: u32) -> Self {
        self.step.retry = Some(RetryPolicy::new(limit, interval_secs));
        self
    }

    pub fn continue_on_failure(mut self) -> Self {
        self.step.continue_on = Some(ContinueOn::failure());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.step.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Step {
        self.step
    }
}
