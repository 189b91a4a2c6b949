//! Shared fixtures for scenario tests

use flowdag::{
    ArgType, CommandExec, Executor, Step, ToolArg, ToolDef, ToolExec, ValidationError,
    ValidationReport, Workflow,
};

/// Shell step with no dependencies
pub fn command_step(name: &str) -> Step {
    Step::builder(
        name,
        Executor::Command(CommandExec::new("alpine:3.20", "echo ok")),
    )
    .build()
}

/// Shell step depending on the given steps
pub fn dependent_step(name: &str, depends: &[&str]) -> Step {
    let mut builder = Step::builder(
        name,
        Executor::Command(CommandExec::new("alpine:3.20", "echo ok")),
    );
    for dep in depends {
        builder = builder.depends_on(*dep);
    }
    builder.build()
}

/// The demo graph: a, then b after a, then c after a and b
pub fn demo_workflow() -> Workflow {
    Workflow::builder("demo")
        .step(command_step("a"))
        .step(dependent_step("b", &["a"]))
        .step(dependent_step("c", &["a", "b"]))
        .build()
        .unwrap()
}

/// Tool step invoking kubectl with a concrete argument map
pub fn kubectl_step(name: &str) -> Step {
    let tool = ToolDef::new(
        "kubectl",
        "bitnami/kubectl:1.21",
        "#!/bin/bash\nkubectl $command",
    )
    .arg(ToolArg::required("command", ArgType::Str).description("kubectl arguments"));

    Step::builder(name, Executor::Tool(ToolExec::new(tool).arg("command", "get pods")))
        .output("PODS")
        .build()
}

/// Assert the report contains an error matching the predicate
pub fn assert_has_error(
    report: &ValidationReport,
    what: &str,
    predicate: impl Fn(&ValidationError) -> bool,
) {
    assert!(
        report.errors.iter().any(predicate),
        "expected {} in report, got: {:?}",
        what,
        report.errors
    );
}
