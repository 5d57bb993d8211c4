//! End-to-end orchestration façade tests

use std::sync::Arc;

use devpilot::config::PlatformConfig;
use devpilot::orchestration::{AgentOrchestrator, AgentStatus, OrchestrationOutcome};

use super::common::{sample_spec, tags, ScriptedExecutor};

#[tokio::test]
async fn test_unknown_required_capabilities_rejected_before_dispatch() {
    let config = PlatformConfig {
        available_capabilities: tags(&["backend-developer"]),
        ..Default::default()
    };
    let executor = Arc::new(ScriptedExecutor::new());
    let orchestrator = AgentOrchestrator::new(config, executor.clone());

    let mut spec = sample_spec("feature-development");
    spec.max_agents = 5;
    spec.required_capabilities = tags(&["backend-developer", "security-auditor"]);

    let outcome = orchestrator.orchestrate_workflow(spec).await;

    let OrchestrationOutcome::Failed(failure) = &outcome else {
        panic!("expected validation failure, got {:?}", outcome);
    };
    assert!(failure
        .error
        .contains("unknown capabilities required: security-auditor"));
    assert!(!outcome.success());

    // The workflow never started
    assert_eq!(executor.invocation_count(), 0);
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    let executor = Arc::new(ScriptedExecutor::new());
    let orchestrator = AgentOrchestrator::new(PlatformConfig::default(), executor);

    let mut spec = sample_spec("feature-development");
    spec.target_path = String::new();
    spec.max_agents = 50;
    spec.required_capabilities = tags(&["rust-wizard"]);

    let outcome = orchestrator.orchestrate_workflow(spec).await;

    let OrchestrationOutcome::Failed(failure) = outcome else {
        panic!("expected validation failure");
    };
    assert!(failure.error.contains("rust-wizard"));
    assert!(failure.error.contains("too many agents requested: 50"));
    assert!(failure.error.contains("target path is required"));
}

#[tokio::test]
async fn test_successful_workflow_end_to_end() {
    let executor = Arc::new(ScriptedExecutor::new());
    let orchestrator = AgentOrchestrator::new(PlatformConfig::default(), executor.clone());

    let outcome = orchestrator
        .orchestrate_workflow(sample_spec("feature-development"))
        .await;

    let OrchestrationOutcome::Executed(result) = outcome else {
        panic!("expected executed outcome");
    };

    // 5 default capabilities: 3 analysis + 2 implementation + 2 validation
    assert_eq!(result.total_agents, 7);
    assert_eq!(result.completed_agents, 7);
    assert_eq!(result.failed_agents, 0);
    assert!(result.success);
    assert_eq!(result.total_resource_units, 700);
    assert!(result.workflow_duration_seconds > 0.0);
    assert!(!result.output.recommendations.is_empty());
    assert!(result.output.issues.is_empty());
    assert_eq!(executor.invocation_count(), 7);
}

#[tokio::test]
async fn test_success_iff_zero_failed_agents() {
    // test-strategist runs in analysis and again in validation, so both
    // invocations fail
    let executor = Arc::new(ScriptedExecutor::failing(&["test-strategist"]));
    let orchestrator = AgentOrchestrator::new(PlatformConfig::default(), executor);

    let outcome = orchestrator
        .orchestrate_workflow(sample_spec("feature-development"))
        .await;

    let OrchestrationOutcome::Executed(result) = outcome else {
        panic!("expected executed outcome");
    };

    assert_eq!(result.failed_agents, 2);
    assert_eq!(result.completed_agents, 5);
    assert!(!result.success);
    assert_eq!(result.success, result.failed_agents == 0);
    assert_eq!(result.output.issues.len(), 2);
    for issue in &result.output.issues {
        assert_eq!(issue.capability, "test-strategist");
        assert_eq!(issue.error, "test-strategist exploded");
    }
}

#[tokio::test]
async fn test_dry_run_dispatches_nothing() {
    let executor = Arc::new(ScriptedExecutor::new());
    let orchestrator = AgentOrchestrator::new(PlatformConfig::default(), executor.clone());

    let mut spec = sample_spec("feature-development");
    spec.dry_run = true;

    let outcome = orchestrator.orchestrate_workflow(spec).await;

    let OrchestrationOutcome::Planned(preview) = &outcome else {
        panic!("expected planned outcome");
    };

    assert_eq!(preview.selected_capabilities.len(), 5);
    assert_eq!(preview.estimated_duration_seconds, 1500);
    assert_eq!(preview.estimated_resource_units, 700);
    assert_eq!(outcome.total_agents(), 5);
    assert!(outcome.executions().is_empty());
    assert!(outcome.success());

    // The capability executor was never touched
    assert_eq!(executor.invocation_count(), 0);
}

#[tokio::test]
async fn test_workflow_ids_unique_across_calls() {
    let orchestrator = AgentOrchestrator::with_defaults();

    let mut first_spec = sample_spec("bug-investigation");
    first_spec.dry_run = true;
    let mut second_spec = sample_spec("bug-investigation");
    second_spec.dry_run = true;

    let first = orchestrator.orchestrate_workflow(first_spec).await;
    let second = orchestrator.orchestrate_workflow(second_spec).await;

    assert_ne!(first.workflow_id(), second.workflow_id());
}

#[tokio::test]
async fn test_workflow_timeout_enforced() {
    // debugger stalls forever; the 1s spec timeout must cut it off
    let executor = Arc::new(ScriptedExecutor::stalling(&["debugger"]));
    let orchestrator = AgentOrchestrator::new(PlatformConfig::default(), executor.clone());

    let mut spec = sample_spec("bug-investigation");
    spec.timeout = Some(1);

    let outcome = orchestrator.orchestrate_workflow(spec).await;

    let OrchestrationOutcome::Executed(result) = outcome else {
        panic!("expected executed outcome");
    };

    assert!(!result.success);
    let expired: Vec<_> = result
        .executions
        .iter()
        .filter(|e| e.status == AgentStatus::TimedOut)
        .collect();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].capability, "debugger");

    // Analysis siblings completed; later phases were skipped entirely
    assert_eq!(result.total_agents, 3);
    assert_eq!(executor.invocation_count(), 3);
    for execution in &result.executions {
        assert!(execution.end_time.is_some());
    }
}
