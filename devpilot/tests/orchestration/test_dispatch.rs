//! Tests for phase-by-phase parallel dispatch

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use devpilot::orchestration::dispatch::execute_plan;
use devpilot::orchestration::plan::plan_execution;
use devpilot::orchestration::types::{AgentExecution, AgentStatus};

use super::common::{sample_spec, tags, ScriptedExecutor};

fn phase_executions<'a>(executions: &'a [AgentExecution], phase: &str) -> Vec<&'a AgentExecution> {
    executions
        .iter()
        .filter(|execution| execution.task_id.starts_with(phase))
        .collect()
}

#[tokio::test]
async fn test_all_phases_dispatch_all_capabilities() {
    let plan = plan_execution(&tags(&["a", "b", "c", "d"]));
    let executor = Arc::new(ScriptedExecutor::new());
    let spec = sample_spec("custom");

    let executions = execute_plan(&plan, &spec, executor, None).await;

    // 3 analysis + 1 implementation + 2 validation
    assert_eq!(executions.len(), 6);
    for execution in &executions {
        assert_eq!(execution.status, AgentStatus::Completed);
        assert!(execution.end_time.is_some());
        assert!(execution.result.is_some());
    }
}

#[tokio::test]
async fn test_invocations_within_phase_run_concurrently() {
    let plan = plan_execution(&tags(&["a", "b", "c"]));
    let executor = Arc::new(ScriptedExecutor::new());
    let spec = sample_spec("custom");

    let executions = execute_plan(&plan, &spec, executor, None).await;
    let analysis = phase_executions(&executions, "analysis");
    assert_eq!(analysis.len(), 3);

    // Every invocation launches before any sibling settles
    let latest_start = analysis.iter().map(|e| e.start_time).max().unwrap();
    let earliest_end = analysis.iter().filter_map(|e| e.end_time).min().unwrap();
    assert!(latest_start < earliest_end);
}

#[tokio::test]
async fn test_phase_barrier_strictly_ordered() {
    let plan = plan_execution(&tags(&["a", "b", "c", "d"]));
    let executor = Arc::new(ScriptedExecutor::new());
    let spec = sample_spec("custom");

    let executions = execute_plan(&plan, &spec, executor, None).await;

    let analysis_latest_end = phase_executions(&executions, "analysis")
        .iter()
        .filter_map(|e| e.end_time)
        .max()
        .unwrap();
    let implementation_earliest_start = phase_executions(&executions, "implementation")
        .iter()
        .map(|e| e.start_time)
        .min()
        .unwrap();
    let validation_earliest_start = phase_executions(&executions, "validation")
        .iter()
        .map(|e| e.start_time)
        .min()
        .unwrap();

    assert!(implementation_earliest_start >= analysis_latest_end);
    assert!(validation_earliest_start >= implementation_earliest_start);
}

#[tokio::test]
async fn test_failure_does_not_abort_siblings_or_workflow() {
    let plan = plan_execution(&tags(&["x", "y"]));
    let executor = Arc::new(ScriptedExecutor::failing(&["x"]));
    let spec = sample_spec("custom");

    let executions = execute_plan(&plan, &spec, executor, None).await;

    // analysis [x, y] + validation pair: the failure is isolated
    assert_eq!(executions.len(), 4);

    let analysis = phase_executions(&executions, "analysis");
    let failed = analysis.iter().find(|e| e.capability == "x").unwrap();
    let sibling = analysis.iter().find(|e| e.capability == "y").unwrap();

    assert_eq!(failed.status, AgentStatus::Failed);
    assert_eq!(failed.error.as_deref(), Some("x exploded"));
    assert!(failed.end_time.is_some());
    assert_eq!(sibling.status, AgentStatus::Completed);

    // The next phase still ran
    assert_eq!(phase_executions(&executions, "validation").len(), 2);
}

#[tokio::test]
async fn test_deadline_marks_running_as_timed_out_and_skips_rest() {
    let plan = plan_execution(&tags(&["a", "b"]));
    let executor = Arc::new(ScriptedExecutor::stalling(&["b"]));
    let spec = sample_spec("custom");
    let deadline = Instant::now() + Duration::from_millis(200);

    let executions = execute_plan(&plan, &spec, executor, Some(deadline)).await;

    // Only the analysis phase produced records; validation never started
    assert_eq!(executions.len(), 2);

    let completed = executions.iter().find(|e| e.capability == "a").unwrap();
    let expired = executions.iter().find(|e| e.capability == "b").unwrap();

    assert_eq!(completed.status, AgentStatus::Completed);
    assert_eq!(expired.status, AgentStatus::TimedOut);
    assert_eq!(expired.error.as_deref(), Some("workflow deadline exceeded"));
    assert!(expired.end_time.is_some());
}

#[tokio::test]
async fn test_validation_phase_repeats_selected_capability() {
    let plan = plan_execution(&tags(&["test-strategist"]));
    let executor = Arc::new(ScriptedExecutor::new());
    let spec = sample_spec("custom");

    let executions = execute_plan(&plan, &spec, executor.clone(), None).await;

    // test-strategist runs in analysis and again in validation
    let strategist_runs = executions
        .iter()
        .filter(|e| e.capability == "test-strategist")
        .count();
    assert_eq!(strategist_runs, 2);
    assert_eq!(executor.invocation_count(), 3);

    // Repeat invocations still get distinct agent ids
    let mut agent_ids: Vec<_> = executions.iter().map(|e| e.agent_id.clone()).collect();
    agent_ids.sort();
    agent_ids.dedup();
    assert_eq!(agent_ids.len(), executions.len());
}
