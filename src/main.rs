mod cli;
mod client;
mod core;
mod wire;

use anyhow::{Context, Result};
use crate::cli::commands::{
    PlanCommand, RenderCommand, RenderFormat, SubmitCommand, ValidateCommand,
};
use crate::cli::output::*;
use crate::cli::{Cli, Command};
use crate::client::{EngineBackend, EngineClientConfig, HttpEngineClient};
use crate::core::workflow::Workflow;
use std::path::Path;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Validate(cmd) => validate_workflow(cmd)?,
        Command::Plan(cmd) => plan_workflow(cmd)?,
        Command::Render(cmd) => render_workflow(cmd)?,
        Command::Submit(cmd) => submit_workflow(cmd).await?,
    }

    Ok(())
}

/// Load a workflow definition, picking the codec from the file extension
fn load_workflow(path: &str) -> Result<Workflow> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path))?;

    let workflow = if Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "json")
    {
        wire::decode_json(&content)
    } else {
        wire::decode_yaml(&content)
    };

    workflow.map_err(Into::into)
}

fn validate_workflow(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating workflow...", INFO);

    match load_workflow(&cmd.file) {
        Ok(workflow) => {
            let report = workflow.validate();

            println!("{} Workflow definition is valid!", CHECK);
            println!("  Name: {}", style(&workflow.name).bold());
            println!("  Type: {}", style(workflow.kind).cyan());
            println!("  Steps: {}", style(workflow.steps().len()).cyan());

            if !report.warnings.is_empty() {
                print_report(&report);
            }

            if cmd.json {
                let data = serde_json::json!({
                    "name": workflow.name,
                    "type": workflow.kind.as_str(),
                    "steps": workflow.steps().len(),
                    "warnings": report
                        .warnings
                        .iter()
                        .map(|w| w.to_string())
                        .collect::<Vec<_>>(),
                });
                println!("\n{}", serde_json::to_string_pretty(&data)?);
            }

            Ok(())
        }
        Err(err) => {
            println!("{} Validation failed:", CROSS);
            match err.downcast_ref::<wire::WireError>() {
                Some(wire::WireError::Invalid(report)) => print_report(report),
                _ => println!("  {}", style(&err).red()),
            }
            std::process::exit(1);
        }
    }
}

fn plan_workflow(cmd: &PlanCommand) -> Result<()> {
    let workflow = load_workflow(&cmd.file)?;
    let order = workflow.execution_order()?;

    println!(
        "{} Execution plan for {} ({} steps):",
        INFO,
        style(&workflow.name).bold(),
        order.len()
    );
    for (position, name) in order.iter().enumerate() {
        let depends = workflow
            .step(name)
            .map(|s| s.depends.as_slice())
            .unwrap_or(&[]);
        println!("{}", format_plan_entry(position + 1, name, depends));
    }

    Ok(())
}

fn render_workflow(cmd: &RenderCommand) -> Result<()> {
    let workflow = load_workflow(&cmd.file)?;

    let rendered = match cmd.format {
        RenderFormat::Yaml => wire::encode_yaml(&workflow)?,
        RenderFormat::Json => wire::encode_json_pretty(&workflow)?,
    };
    print!("{}", rendered);

    Ok(())
}

async fn submit_workflow(cmd: &SubmitCommand) -> Result<()> {
    let workflow = load_workflow(&cmd.file)?;

    let report = workflow.validate();
    if !report.is_ok() {
        println!("{} Refusing to submit, validation failed:", CROSS);
        print_report(&report);
        std::process::exit(1);
    }

    let mut config =
        EngineClientConfig::new(cmd.endpoint.clone()).with_timeout_secs(cmd.timeout_secs);
    if let Some(api_key) = &cmd.api_key {
        config = config.with_api_key(api_key.clone());
    }
    let client = HttpEngineClient::new(config)?;

    println!(
        "{} Submitting {} to {}",
        ROCKET,
        style(&workflow.name).bold(),
        style(&cmd.endpoint).dim()
    );

    match client.submit(&workflow).await {
        Ok(receipt) => {
            println!(
                "{} Accepted (request {})",
                CHECK,
                style(&receipt.request_id.to_string()[..8]).dim()
            );
            if let Some(run_id) = &receipt.run_id {
                println!("  Run: {}", style(run_id).cyan());
            }
            Ok(())
        }
        Err(err) => {
            println!("{} Submission failed: {}", CROSS, style(&err).red());
            error!("{err}");
            std::process::exit(1);
        }
    }
}
