/*
┌─────────────────────────────────────────────────────────────────┐
│                     DEVPILOT ORCHESTRATION                      │
└─────────────────────────────────────────────────────────────────┘

  orchestrate <workflow>
    │
    ├─> Validate specification against the capability registry
    ├─> Select capabilities (required → preferred → workflow defaults)
    ├─> Plan phases (analysis → implementation → validation)
    │
    ├─> --dry-run: print the plan and stop
    │
    └─> Dispatch phases sequentially, agents within a phase in
        parallel, then aggregate results and exit 0 iff no agent
        failed.

  capabilities
    │
    └─> Print known capability tags and per-workflow defaults.
*/

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use devpilot::cli::{Cli, Command, OrchestrateArgs, OutputFormat};
use devpilot::config::PlatformConfig;
use devpilot::orchestration::{
    AgentOrchestrator, CapabilityRegistry, OrchestrationOutcome, SimulatedExecutor,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlatformConfig::load(path).await?,
        None => PlatformConfig::default(),
    };

    match cli.command {
        Command::Capabilities => {
            print_capabilities(&config);
            Ok(())
        }
        Command::Orchestrate(args) => run_orchestrate(config, args).await,
    }
}

async fn run_orchestrate(config: PlatformConfig, args: OrchestrateArgs) -> Result<()> {
    let orchestrator = AgentOrchestrator::new(config, Arc::new(SimulatedExecutor::default()));
    let spec = args.to_specification();

    println!("Orchestrating workflow: {}", spec.name);
    let outcome = orchestrator.orchestrate_workflow(spec).await;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&outcome)?),
        OutputFormat::Text => print_outcome_text(&outcome),
    }

    if !outcome.success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome_text(outcome: &OrchestrationOutcome) {
    println!("{}", "=".repeat(60));
    match outcome {
        OrchestrationOutcome::Executed(result) => {
            println!("Workflow: {}", result.workflow_id);
            println!("Success: {}", result.success);
            println!(
                "Agents: {} total, {} completed, {} failed",
                result.total_agents, result.completed_agents, result.failed_agents
            );
            println!("Duration: {:.2}s", result.workflow_duration_seconds);
            println!("Resource units: {}", result.total_resource_units);
            println!("Output: {}", result.output.summary);

            if !result.output.recommendations.is_empty() {
                println!();
                println!("Recommendations:");
                for recommendation in &result.output.recommendations {
                    println!("  - {}", recommendation);
                }
            }
            if !result.output.issues.is_empty() {
                println!();
                println!("Issues:");
                for issue in &result.output.issues {
                    println!("  - {}: {}", issue.capability, issue.error);
                }
            }
        }
        OrchestrationOutcome::Planned(preview) => {
            println!("Workflow: {}", preview.workflow_id);
            println!("Dry run - planned execution for '{}'", preview.workflow);
            println!(
                "Selected agents ({}): {}",
                preview.selected_capabilities.len(),
                preview.selected_capabilities.join(", ")
            );
            println!();
            println!("Phases:");
            for (index, phase) in preview.plan.phases.iter().enumerate() {
                println!(
                    "  {}. {} ({}s): {}",
                    index + 1,
                    phase.name,
                    phase.estimated_duration_seconds,
                    phase.capabilities.join(", ")
                );
            }
            println!();
            println!("Estimated duration: {}s", preview.estimated_duration_seconds);
            println!(
                "Estimated resource units: {}",
                preview.estimated_resource_units
            );
        }
        OrchestrationOutcome::Failed(failure) => {
            println!("Workflow: {}", failure.workflow_id);
            println!("Success: false");
            println!("Error: {}", failure.error);
        }
    }
    println!("{}", "=".repeat(60));
}

fn print_capabilities(config: &PlatformConfig) {
    let registry = CapabilityRegistry::from_config(config);

    println!("Available capabilities:");
    for tag in registry.available() {
        println!("  - {}", tag);
    }

    println!();
    println!("Workflow defaults:");
    let mut names: Vec<_> = registry.workflow_names().collect();
    names.sort();
    for name in names {
        println!("  {}: {}", name, registry.defaults_for(name).join(", "));
    }
}
