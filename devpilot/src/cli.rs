//! CLI argument parsing for the devpilot binary

use clap::{Args, Parser, Subcommand, ValueEnum};

use devpilot_sdk::{WorkflowPriority, WorkflowSpecification};

/// devpilot - multi-agent development workflow orchestration
#[derive(Parser, Debug)]
#[command(name = "devpilot", version, about)]
pub struct Cli {
    /// Path to a platform configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a multi-agent workflow against a project
    Orchestrate(OrchestrateArgs),

    /// List known capability tags and per-workflow defaults
    Capabilities,
}

#[derive(Args, Debug, Clone)]
pub struct OrchestrateArgs {
    /// Workflow name (e.g. feature-development, bug-investigation)
    pub workflow: String,

    /// Target project path
    #[arg(short, long, default_value = ".")]
    pub project: String,

    /// Maximum number of agents (0 = platform default)
    #[arg(short, long, default_value_t = 0)]
    pub agents: u32,

    /// Workflow priority
    #[arg(long, value_enum, default_value = "normal")]
    pub priority: PriorityArg,

    /// Plan the workflow without dispatching any agents
    #[arg(long)]
    pub dry_run: bool,

    /// Emit structured progress events on stderr
    #[arg(long)]
    pub monitoring: bool,

    /// Overall workflow deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Capability tags that must participate (comma-separated)
    #[arg(long = "required", value_delimiter = ',')]
    pub required_capabilities: Vec<String>,

    /// Capability tags to include if room remains (comma-separated)
    #[arg(long = "preferred", value_delimiter = ',')]
    pub preferred_capabilities: Vec<String>,

    /// Output format for the orchestration result
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Workflow priority flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
    Critical,
}

impl From<PriorityArg> for WorkflowPriority {
    fn from(priority: PriorityArg) -> Self {
        match priority {
            PriorityArg::Low => WorkflowPriority::Low,
            PriorityArg::Normal => WorkflowPriority::Normal,
            PriorityArg::High => WorkflowPriority::High,
            PriorityArg::Critical => WorkflowPriority::Critical,
        }
    }
}

/// Result rendering format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OrchestrateArgs {
    /// Build the workflow specification this command describes
    pub fn to_specification(&self) -> WorkflowSpecification {
        WorkflowSpecification {
            name: self.workflow.clone(),
            target_path: self.project.clone(),
            max_agents: self.agents,
            priority: self.priority.into(),
            dry_run: self.dry_run,
            monitoring: self.monitoring,
            required_capabilities: self.required_capabilities.clone(),
            preferred_capabilities: self.preferred_capabilities.clone(),
            timeout: self.timeout,
            ..Default::default()
        }
    }
}
