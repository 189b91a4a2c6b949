//! Fail-fast construction errors

use crate::helpers::*;
use flowdag::{BuildError, Workflow, WorkflowKind};

#[test]
fn test_duplicate_step_name_rejected_and_workflow_unchanged() {
    let mut workflow = Workflow::new("demo", WorkflowKind::Graph).unwrap();
    workflow.add_step(command_step("parse")).unwrap();

    let err = workflow.add_step(command_step("parse")).unwrap_err();
    assert_eq!(err, BuildError::DuplicateStepName("parse".to_string()));
    assert_eq!(workflow.steps().len(), 1);
}

#[test]
fn test_unknown_dependency_identifies_missing_step() {
    let mut workflow = Workflow::new("demo", WorkflowKind::Graph).unwrap();

    let err = workflow
        .add_step(dependent_step("d", &["z"]))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnknownDependency {
            step: "d".to_string(),
            dependency: "z".to_string(),
        }
    );
    assert!(workflow.step("d").is_none());
}

#[test]
fn test_empty_workflow_name_rejected() {
    assert!(matches!(
        Workflow::new("", WorkflowKind::Graph),
        Err(BuildError::Configuration(_))
    ));
    assert!(matches!(
        Workflow::new("  ", WorkflowKind::Chain),
        Err(BuildError::Configuration(_))
    ));
}

#[test]
fn test_builder_requires_dependencies_declared_first() {
    let err = Workflow::builder("demo")
        .step(dependent_step("b", &["a"]))
        .step(command_step("a"))
        .build()
        .unwrap_err();

    assert!(matches!(err, BuildError::UnknownDependency { .. }));
}

#[test]
fn test_demo_workflow_validates_cleanly() {
    let workflow = demo_workflow();
    let report = workflow.validate();
    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
    assert_eq!(workflow.execution_order().unwrap(), vec!["a", "b", "c"]);
}
