//! Cycle detection over decoded documents
//!
//! The fluent builder cannot produce forward references, so cyclic
//! graphs are fed in through the wire format, the same path a
//! hand-written definition file would take.

use crate::helpers::*;
use flowdag::{wire, ValidationError, WireError};

fn step_yaml(name: &str, depends: &[&str]) -> String {
    let depends = if depends.is_empty() {
        String::new()
    } else {
        format!("    depends: [{}]\n", depends.join(", "))
    };
    format!(
        "  - name: {}\n    executor:\n      type: command\n      config: {{ image: alpine, script: echo hi }}\n{}",
        name, depends
    )
}

fn graph_yaml(steps: &[(&str, &[&str])]) -> String {
    let mut yaml = String::from("name: cyclic\ntype: graph\nsteps:\n");
    for (name, depends) in steps {
        yaml.push_str(&step_yaml(name, depends));
    }
    yaml
}

fn expect_cycle(yaml: &str) -> Vec<String> {
    let err = wire::decode_yaml(yaml).unwrap_err();
    let WireError::Invalid(report) = err else {
        panic!("expected validation failure, got: {}", err);
    };
    report
        .errors
        .iter()
        .find_map(|e| match e {
            ValidationError::CyclicDependency { cycle } => Some(cycle.clone()),
            _ => None,
        })
        .expect("report should contain a cycle error")
}

fn is_rotation(cycle: &[String], of: &[&str]) -> bool {
    if cycle.len() != of.len() {
        return false;
    }
    (0..of.len()).any(|shift| {
        cycle
            .iter()
            .enumerate()
            .all(|(i, name)| name == of[(i + shift) % of.len()])
    })
}

#[test]
fn test_three_step_cycle_reported_in_full() {
    let yaml = graph_yaml(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
    let cycle = expect_cycle(&yaml);
    assert!(
        is_rotation(&cycle, &["a", "b", "c"]),
        "unexpected cycle: {:?}",
        cycle
    );
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let yaml = graph_yaml(&[("loner", &["loner"])]);
    assert_eq!(expect_cycle(&yaml), vec!["loner"]);
}

#[test]
fn test_cycle_excludes_steps_outside_it() {
    let yaml = graph_yaml(&[("entry", &["a"]), ("a", &["b"]), ("b", &["a"])]);
    let cycle = expect_cycle(&yaml);
    assert!(is_rotation(&cycle, &["a", "b"]), "unexpected cycle: {:?}", cycle);
}

#[test]
fn test_forward_references_are_fine_in_graph_mode() {
    // b is declared before its dependency a; only cycles are rejected
    let yaml = graph_yaml(&[("b", &["a"]), ("a", &[])]);
    let workflow = wire::decode_yaml(&yaml).unwrap();
    assert_eq!(workflow.execution_order().unwrap(), vec!["a", "b"]);
}

#[test]
fn test_unknown_dependency_in_document_collected() {
    let yaml = graph_yaml(&[("a", &["ghost"])]);
    let err = wire::decode_yaml(&yaml).unwrap_err();
    let WireError::Invalid(report) = err else {
        panic!("expected validation failure");
    };
    assert_has_error(&report, "unknown dependency", |e| {
        matches!(
            e,
            ValidationError::UnknownDependency { step, dependency }
                if step == "a" && dependency == "ghost"
        )
    });
}
