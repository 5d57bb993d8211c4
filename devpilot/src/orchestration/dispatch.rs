//! Phase-by-phase parallel dispatch of capability invocations
//!
//! Phases execute strictly sequentially; every invocation within a phase
//! runs as its own task and the dispatcher waits for the whole phase to
//! settle before moving on. A failing invocation never aborts its siblings
//! or the workflow, it becomes a failed execution record. The only early
//! exit is the workflow deadline: on expiry, still-running invocations are
//! recorded as timed out and remaining phases are skipped.

use chrono::{DateTime, Utc};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use uuid::Uuid;

use devpilot_sdk::{
    log_agent_complete, log_agent_failed, log_agent_start, log_agent_timeout, log_phase_complete,
    log_phase_start, CapabilityExecutor, PhaseContext, WorkflowSpecification,
};

use crate::orchestration::types::{AgentExecution, AgentStatus, ExecutionPlan};

/// Bookkeeping for one in-flight invocation, kept until it settles
struct PendingInvocation {
    agent_id: String,
    capability: String,
    task_id: String,
    started_at: DateTime<Utc>,
    abort: AbortHandle,
}

/// Execute every phase of a plan and collect all invocation records.
///
/// `deadline`, when present, bounds the whole call: expiry aborts whatever
/// is still running, records those invocations as timed out, and returns
/// immediately with everything that settled.
pub async fn execute_plan(
    plan: &ExecutionPlan,
    spec: &WorkflowSpecification,
    executor: Arc<dyn CapabilityExecutor>,
    deadline: Option<Instant>,
) -> Vec<AgentExecution> {
    let spec = Arc::new(spec.clone());
    let total_phases = plan.phases.len();
    let mut executions = Vec::new();

    'phases: for (phase_index, phase) in plan.phases.iter().enumerate() {
        if spec.monitoring {
            log_phase_start!(phase_index, &phase.name, total_phases);
        }

        let mut pending: HashMap<usize, PendingInvocation> = HashMap::new();
        let mut in_flight = FuturesUnordered::new();

        for (ordinal, capability) in phase.capabilities.iter().enumerate() {
            let started_at = Utc::now();
            let agent_id = agent_id_for(capability, started_at);
            let task_id = format!("{}_task_{}", phase.name, ordinal);
            let context = PhaseContext {
                phase: phase_index,
                name: phase.name.clone(),
                total_phases,
            };

            if spec.monitoring {
                log_agent_start!(&agent_id, capability, &task_id);
            }

            let handle = tokio::spawn(run_invocation(
                executor.clone(),
                spec.clone(),
                context,
                agent_id.clone(),
                capability.clone(),
                task_id.clone(),
                started_at,
            ));
            pending.insert(
                ordinal,
                PendingInvocation {
                    agent_id,
                    capability: capability.clone(),
                    task_id,
                    started_at,
                    abort: handle.abort_handle(),
                },
            );
            in_flight.push(async move { (ordinal, handle.await) });
        }

        // Barrier: the whole phase settles before the next phase starts
        while !pending.is_empty() {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, in_flight.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        executions.extend(expire_pending(pending, spec.monitoring));
                        break 'phases;
                    }
                },
                None => in_flight.next().await,
            };

            let Some((ordinal, joined)) = next else {
                break;
            };
            let Some(info) = pending.remove(&ordinal) else {
                continue;
            };

            let execution = match joined {
                Ok(execution) => execution,
                // The invocation task itself died; record the failure in
                // its place instead of aborting the phase
                Err(join_error) => failed_execution(info, join_error.to_string()),
            };

            if spec.monitoring {
                match execution.status {
                    AgentStatus::Completed => {
                        log_agent_complete!(
                            &execution.agent_id,
                            &execution.capability,
                            execution.execution_time_seconds.unwrap_or(0.0)
                        );
                    }
                    _ => {
                        log_agent_failed!(
                            &execution.agent_id,
                            &execution.capability,
                            execution.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                }
            }

            executions.push(execution);
        }

        if spec.monitoring {
            log_phase_complete!(phase_index, &phase.name);
        }
    }

    executions
}

/// Run one capability invocation to a terminal state.
///
/// Executor errors are converted to failed executions here, so the future
/// itself never fails.
async fn run_invocation(
    executor: Arc<dyn CapabilityExecutor>,
    spec: Arc<WorkflowSpecification>,
    context: PhaseContext,
    agent_id: String,
    capability: String,
    task_id: String,
    started_at: DateTime<Utc>,
) -> AgentExecution {
    match executor.invoke(&capability, spec.as_ref(), &context).await {
        Ok(output) => {
            let ended_at = Utc::now();
            AgentExecution {
                agent_id,
                capability,
                task_id,
                status: AgentStatus::Completed,
                start_time: started_at,
                end_time: Some(ended_at),
                execution_time_seconds: Some(elapsed_seconds(started_at, ended_at)),
                resource_units_used: output.resource_units,
                result: Some(output),
                error: None,
            }
        }
        Err(error) => {
            let ended_at = Utc::now();
            AgentExecution {
                agent_id,
                capability,
                task_id,
                status: AgentStatus::Failed,
                start_time: started_at,
                end_time: Some(ended_at),
                execution_time_seconds: Some(elapsed_seconds(started_at, ended_at)),
                resource_units_used: 0,
                result: None,
                error: Some(error.to_string()),
            }
        }
    }
}

/// Abort everything still in flight and record the invocations as timed out
fn expire_pending(
    pending: HashMap<usize, PendingInvocation>,
    monitoring: bool,
) -> Vec<AgentExecution> {
    let mut expired: Vec<_> = pending.into_iter().collect();
    expired.sort_by_key(|(ordinal, _)| *ordinal);

    expired
        .into_iter()
        .map(|(_, info)| {
            info.abort.abort();
            if monitoring {
                log_agent_timeout!(&info.agent_id, &info.capability);
            }
            let ended_at = Utc::now();
            AgentExecution {
                agent_id: info.agent_id,
                capability: info.capability,
                task_id: info.task_id,
                status: AgentStatus::TimedOut,
                start_time: info.started_at,
                end_time: Some(ended_at),
                execution_time_seconds: Some(elapsed_seconds(info.started_at, ended_at)),
                resource_units_used: 0,
                result: None,
                error: Some("workflow deadline exceeded".to_string()),
            }
        })
        .collect()
}

/// Record a failed execution for an invocation whose task died
fn failed_execution(info: PendingInvocation, error: String) -> AgentExecution {
    let ended_at = Utc::now();
    AgentExecution {
        agent_id: info.agent_id,
        capability: info.capability,
        task_id: info.task_id,
        status: AgentStatus::Failed,
        start_time: info.started_at,
        end_time: Some(ended_at),
        execution_time_seconds: Some(elapsed_seconds(info.started_at, ended_at)),
        resource_units_used: 0,
        result: None,
        error: Some(error),
    }
}

/// Unique invocation id: capability tag, launch timestamp, random nonce
///
/// The nonce keeps ids unique when the same tag launches twice within one
/// timestamp tick (the validation phase can repeat an earlier tag).
fn agent_id_for(capability: &str, started_at: DateTime<Utc>) -> String {
    let mut nonce = Uuid::new_v4().simple().to_string();
    nonce.truncate(8);
    format!("{}_{}_{}", capability, started_at.format("%H%M%S"), nonce)
}

fn elapsed_seconds(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> f64 {
    (ended_at - started_at).num_milliseconds() as f64 / 1000.0
}
