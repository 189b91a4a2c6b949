//! CLI command definitions

use clap::Args;

/// Validate a workflow definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to workflow file (YAML, or JSON for .json files)
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show the execution order
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Path to workflow file
    #[arg(short, long)]
    pub file: String,
}

/// Re-serialize a workflow definition
#[derive(Debug, Args, Clone)]
pub struct RenderCommand {
    /// Path to workflow file
    #[arg(short, long)]
    pub file: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = RenderFormat::Yaml)]
    pub format: RenderFormat,
}

/// Render output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    Yaml,
    Json,
}

/// Submit a workflow to an execution engine
#[derive(Debug, Args, Clone)]
pub struct SubmitCommand {
    /// Path to workflow file
    #[arg(short, long)]
    pub file: String,

    /// Engine base URL
    #[arg(short, long)]
    pub endpoint: String,

    /// Bearer token for the engine
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
