//! Chain workflows derive their order from declaration order

use crate::helpers::*;
use flowdag::{wire, ValidationError, WireError, Workflow, WorkflowKind};

#[test]
fn test_chain_steps_keep_declaration_order() {
    let workflow = Workflow::builder("deploy")
        .chain()
        .step(command_step("build"))
        .step(command_step("test"))
        .step(command_step("release"))
        .build()
        .unwrap();

    assert_eq!(workflow.kind, WorkflowKind::Chain);
    assert_eq!(
        workflow.execution_order().unwrap(),
        vec!["build", "test", "release"]
    );
    assert!(workflow.validate().is_ok());
}

#[test]
fn test_chain_serializes_steps_in_order() {
    let workflow = Workflow::builder("deploy")
        .chain()
        .step(command_step("build"))
        .step(command_step("test"))
        .build()
        .unwrap();

    let json = wire::encode_json(&workflow).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "chain");
    assert_eq!(value["steps"][0]["name"], "build");
    assert_eq!(value["steps"][1]["name"], "test");
}

#[test]
fn test_chain_dependency_on_later_step_is_error() {
    let yaml = r#"
name: deploy
type: chain
steps:
  - name: first
    executor:
      type: command
      config: { image: alpine, script: echo first }
    depends: [second]
  - name: second
    executor:
      type: command
      config: { image: alpine, script: echo second }
"#;
    let err = wire::decode_yaml(yaml).unwrap_err();
    let WireError::Invalid(report) = err else {
        panic!("expected validation failure");
    };
    assert_has_error(&report, "chain order violation", |e| {
        matches!(
            e,
            ValidationError::ChainOrder { step, dependency }
                if step == "first" && dependency == "second"
        )
    });
}

#[test]
fn test_chain_backward_dependency_is_allowed() {
    let yaml = r#"
name: deploy
type: chain
steps:
  - name: build
    executor:
      type: command
      config: { image: alpine, script: make build }
  - name: release
    executor:
      type: command
      config: { image: alpine, script: make release }
    depends: [build]
"#;
    let workflow = wire::decode_yaml(yaml).unwrap();
    assert_eq!(workflow.execution_order().unwrap(), vec!["build", "release"]);
}
