//! Result aggregation across agent executions

use crate::orchestration::types::{
    AgentExecution, AgentOutputEntry, AgentStatus, AggregatedOutput, ExecutionIssue,
};

/// Merge per-invocation outcomes into one workflow-level output.
///
/// Recommendations are the union across completed executions, deduplicated
/// in first-seen order; failed and timed-out executions surface in the
/// issue list. Deterministic for a given execution list.
pub fn aggregate_results(executions: &[AgentExecution]) -> AggregatedOutput {
    let mut agent_outputs = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut issues = Vec::new();
    let mut successful_agents = 0;
    let mut failed_agents = 0;
    let mut total_execution_time_seconds = 0.0;

    for execution in executions {
        match execution.status {
            AgentStatus::Completed => {
                successful_agents += 1;
                if let Some(result) = &execution.result {
                    agent_outputs.push(AgentOutputEntry {
                        capability: execution.capability.clone(),
                        output: result.output.clone(),
                        recommendations: result.recommendations.clone(),
                    });
                    for recommendation in &result.recommendations {
                        if !recommendations.contains(recommendation) {
                            recommendations.push(recommendation.clone());
                        }
                    }
                }
            }
            AgentStatus::Failed | AgentStatus::TimedOut => {
                failed_agents += 1;
                issues.push(ExecutionIssue {
                    capability: execution.capability.clone(),
                    error: execution
                        .error
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                });
            }
            AgentStatus::Pending | AgentStatus::Running => {}
        }

        if let Some(seconds) = execution.execution_time_seconds {
            total_execution_time_seconds += seconds;
        }
    }

    AggregatedOutput {
        summary: format!(
            "{} of {} agent executions completed",
            successful_agents,
            executions.len()
        ),
        agent_outputs,
        recommendations,
        issues,
        successful_agents,
        failed_agents,
        total_execution_time_seconds,
    }
}
