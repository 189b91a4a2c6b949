//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{PlanCommand, RenderCommand, SubmitCommand, ValidateCommand};

/// Workflow graph builder for remote execution engines
#[derive(Debug, Parser, Clone)]
#[command(name = "flowdag")]
#[command(author = "Flowdag Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Build, validate and submit workflow graphs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Validate a workflow definition
    Validate(ValidateCommand),

    /// Show the execution order the engine will follow
    Plan(PlanCommand),

    /// Re-serialize a workflow definition
    Render(RenderCommand),

    /// Submit a workflow to an execution engine
    Submit(SubmitCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
