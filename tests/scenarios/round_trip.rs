//! Wire-format round trips

use crate::helpers::*;
use flowdag::{
    wire, AgentExec, CommandExec, Executor, HttpExec, Param, Step, SubDagExec, ToolDef,
    Workflow, WorkflowKind,
};

/// A representative incident-response workflow touching every executor kind
fn incident_workflow() -> Workflow {
    let triage_tool = ToolDef::new(
        "dd-monitors",
        "datadog/ci:latest",
        "#!/bin/bash\ndatadog-ci monitors search \"$query\"",
    );

    let rollback = Workflow::builder("rollback")
        .step(
            Step::builder(
                "argo-rollback",
                Executor::Command(CommandExec::new(
                    "argoproj/argocd:v2.9",
                    "argocd app rollback $APP",
                )),
            )
            .output("ROLLBACK_RESULT")
            .build(),
        )
        .build()
        .unwrap();

    Workflow::builder("incident-triage")
        .description("Triage a paged incident and notify the channel")
        .kind(WorkflowKind::Graph)
        .param(Param::with_default("channel", "#incidents"))
        .param(Param::new("incident_id").description("PagerDuty incident id"))
        .env("DD_SITE", "datadoghq.eu")
        .timeout_secs(3600)
        .step(
            Step::builder(
                "fetch-token",
                Executor::Http(HttpExec::get("/api/v1/integration/slack/token")),
            )
            .output("SLACK_TOKEN")
            .build(),
        )
        .step(kubectl_step("cluster-state"))
        .step(
            Step::builder(
                "summarize",
                Executor::Agent(
                    AgentExec::new(
                        "incident-summarizer",
                        "Summarize the incident from ${PODS} and the monitor state",
                        "claude-sonnet-4",
                    )
                    .tool(triage_tool),
                ),
            )
            .depends_on("cluster-state")
            .output("SUMMARY")
            .build(),
        )
        .step(
            Step::builder("maybe-rollback", Executor::SubDag(SubDagExec::new(rollback)))
                .depends_on("summarize")
                .precondition("${SUMMARY}", "rollback-recommended")
                .output("ROLLBACK")
                .build(),
        )
        .step(
            Step::builder(
                "notify",
                Executor::Command(
                    CommandExec::new("alpine:3.20", "post-to-slack \"${SUMMARY}\"")
                        .env("SLACK_TOKEN", "${SLACK_TOKEN}"),
                ),
            )
            .depends_on("fetch-token")
            .depends_on("summarize")
            .retry(2, 30)
            .continue_on_failure()
            .build(),
        )
        .build()
        .unwrap()
}

#[test]
fn test_incident_workflow_is_valid() {
    let report = incident_workflow().validate();
    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn test_yaml_round_trip_preserves_graph() {
    let workflow = incident_workflow();
    let yaml = wire::encode_yaml(&workflow).unwrap();
    let decoded = wire::decode_yaml(&yaml).unwrap();
    assert_eq!(decoded, workflow);
}

#[test]
fn test_json_round_trip_preserves_graph() {
    let workflow = incident_workflow();
    let json = wire::encode_json_pretty(&workflow).unwrap();
    let decoded = wire::decode_json(&json).unwrap();
    assert_eq!(decoded, workflow);
}

#[test]
fn test_double_encode_is_identical() {
    let workflow = incident_workflow();
    assert_eq!(
        wire::encode_yaml(&workflow).unwrap(),
        wire::encode_yaml(&workflow).unwrap()
    );
    assert_eq!(
        wire::encode_json(&workflow).unwrap(),
        wire::encode_json(&workflow).unwrap()
    );
}

#[test]
fn test_tool_args_survive_round_trip() {
    let workflow = Workflow::builder("tools")
        .step(kubectl_step("pods"))
        .build()
        .unwrap();

    let decoded = wire::decode_json(&wire::encode_json(&workflow).unwrap()).unwrap();
    let step = decoded.step("pods").unwrap();

    let Executor::Tool(exec) = &step.executor else {
        panic!("expected tool executor");
    };
    assert_eq!(exec.tool.name, "kubectl");
    assert_eq!(
        exec.args.get("command"),
        Some(&serde_json::Value::from("get pods"))
    );
}

#[test]
fn test_executor_discriminators_on_the_wire() {
    let json = wire::encode_json(&incident_workflow()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let kinds: Vec<&str> = value["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["executor"]["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["http", "tool", "agent", "dag", "command"]);
}

#[test]
fn test_nested_workflow_round_trips() {
    let workflow = incident_workflow();
    let decoded = wire::decode_yaml(&wire::encode_yaml(&workflow).unwrap()).unwrap();

    let step = decoded.step("maybe-rollback").unwrap();
    let Executor::SubDag(dag) = &step.executor else {
        panic!("expected dag executor");
    };
    assert_eq!(dag.workflow.name, "rollback");
    assert_eq!(dag.workflow.steps().len(), 1);
}
