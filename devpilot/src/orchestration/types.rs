//! Data types for agent orchestration.
//!
//! This module defines the records produced while executing a workflow:
//!
//! 1. **Execution Plan** - Phased partition of the selected capabilities
//! 2. **Agent Execution** - One capability invocation and its outcome
//! 3. **Aggregated Output** - Merged results across all invocations
//! 4. **Orchestration Outcome** - The façade's final answer to the caller

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpilot_sdk::CapabilityOutput;

// ============================================================================
// Execution Plan Types
// ============================================================================

/// Phased execution plan for the selected capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Phases in dispatch order
    pub phases: Vec<ExecutionPhase>,
}

impl ExecutionPlan {
    /// Sum of the per-phase duration estimates
    pub fn estimated_duration_seconds(&self) -> u64 {
        self.phases
            .iter()
            .map(|phase| phase.estimated_duration_seconds)
            .sum()
    }

    /// Number of capability invocations the plan will dispatch
    ///
    /// Counts the validation phase separately, so a tag planned in two
    /// phases is counted twice.
    pub fn planned_invocations(&self) -> usize {
        self.phases.iter().map(|phase| phase.capabilities.len()).sum()
    }
}

/// One barrier-synchronized group of concurrent invocations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPhase {
    /// Phase name ("analysis", "implementation", "validation")
    pub name: String,

    /// Capability tags dispatched concurrently within this phase
    pub capabilities: Vec<String>,

    /// Coarse duration estimate, fixed per phase name
    pub estimated_duration_seconds: u64,
}

// ============================================================================
// Agent Execution Types
// ============================================================================

/// Lifecycle state of a single capability invocation
///
/// Invocations move `Pending -> Running -> {Completed | Failed | TimedOut}`.
/// Terminal states are final; the orchestrator never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Pending,
    Running,
    Completed,
    Failed,
    TimedOut,
}

impl AgentStatus {
    /// Whether this state counts as a failure for aggregation
    pub fn is_failure(&self) -> bool {
        matches!(self, AgentStatus::Failed | AgentStatus::TimedOut)
    }
}

/// One capability invocation within a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentExecution {
    /// Unique invocation id (capability tag + start timestamp + nonce)
    pub agent_id: String,

    /// Capability tag invoked
    pub capability: String,

    /// Phase name plus ordinal within the phase
    pub task_id: String,

    /// Terminal state reached by the invocation
    pub status: AgentStatus,

    /// When the invocation was launched
    pub start_time: DateTime<Utc>,

    /// When the invocation reached a terminal state
    pub end_time: Option<DateTime<Utc>>,

    /// Success payload, present iff status is Completed
    pub result: Option<CapabilityOutput>,

    /// Failure message, present iff status is Failed or TimedOut
    pub error: Option<String>,

    /// Wall-clock seconds from launch to terminal state
    pub execution_time_seconds: Option<f64>,

    /// Resource units consumed (token stand-in)
    pub resource_units_used: u64,
}

// ============================================================================
// Aggregated Output Types
// ============================================================================

/// Output captured from one completed agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutputEntry {
    /// Capability tag that produced the output
    pub capability: String,

    /// Output text
    pub output: String,

    /// Recommendations from this agent, in reported order
    pub recommendations: Vec<String>,
}

/// One failed or timed-out invocation, surfaced to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionIssue {
    /// Capability tag whose invocation failed
    pub capability: String,

    /// Failure message
    pub error: String,
}

/// Merged results across all invocations of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedOutput {
    /// Human-readable completion summary
    pub summary: String,

    /// Per-agent outputs, execution order
    pub agent_outputs: Vec<AgentOutputEntry>,

    /// Union of all recommendations, deduplicated in first-seen order
    pub recommendations: Vec<String>,

    /// Failed and timed-out invocations
    pub issues: Vec<ExecutionIssue>,

    /// Count of completed invocations
    pub successful_agents: usize,

    /// Count of failed and timed-out invocations
    pub failed_agents: usize,

    /// Sum of per-invocation execution times
    pub total_execution_time_seconds: f64,
}

// ============================================================================
// Orchestration Outcome Types
// ============================================================================

/// Results of a live workflow execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Unique id assigned to this orchestration call
    pub workflow_id: String,

    /// True iff no invocation failed or timed out
    pub success: bool,

    /// Total invocations dispatched
    pub total_agents: usize,

    /// Invocations that completed
    pub completed_agents: usize,

    /// Invocations that failed or timed out
    pub failed_agents: usize,

    /// Every invocation record, phase order then settle order
    pub executions: Vec<AgentExecution>,

    /// Wall-clock duration of the whole orchestration call
    pub workflow_duration_seconds: f64,

    /// Sum of resource units across all invocations
    pub total_resource_units: u64,

    /// Merged outputs, recommendations, and issues
    pub output: AggregatedOutput,

    /// When the orchestration call started
    pub timestamp: DateTime<Utc>,
}

/// Product of a dry run: the plan that would execute, with estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPreview {
    /// Unique id assigned to this orchestration call
    pub workflow_id: String,

    /// Workflow name from the specification
    pub workflow: String,

    /// Capabilities the selector chose, in selection order
    pub selected_capabilities: Vec<String>,

    /// The plan that a live run would dispatch
    pub plan: ExecutionPlan,

    /// Estimated total duration across phases
    pub estimated_duration_seconds: u64,

    /// Estimated resource usage across planned invocations
    pub estimated_resource_units: u64,

    /// When the orchestration call started
    pub timestamp: DateTime<Utc>,
}

/// A workflow that never produced executions: rejected by validation or
/// aborted by an internal error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationFailure {
    /// Unique id assigned to this orchestration call
    pub workflow_id: String,

    /// What went wrong
    pub error: String,

    /// Wall-clock duration until the failure surfaced
    pub workflow_duration_seconds: f64,

    /// When the orchestration call started
    pub timestamp: DateTime<Utc>,
}

/// The façade's return value
///
/// Callers always receive one of these three shapes; orchestration never
/// propagates an error or panic past the façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OrchestrationOutcome {
    /// Live execution finished, possibly with agent failures
    Executed(OrchestrationResult),

    /// Dry run: plan produced, nothing dispatched
    Planned(ExecutionPreview),

    /// Validation rejection or internal error before results existed
    Failed(OrchestrationFailure),
}

impl OrchestrationOutcome {
    /// Overall verdict: executed with zero failures, or planned cleanly
    pub fn success(&self) -> bool {
        match self {
            OrchestrationOutcome::Executed(result) => result.success,
            OrchestrationOutcome::Planned(_) => true,
            OrchestrationOutcome::Failed(_) => false,
        }
    }

    /// Id assigned to the orchestration call
    pub fn workflow_id(&self) -> &str {
        match self {
            OrchestrationOutcome::Executed(result) => &result.workflow_id,
            OrchestrationOutcome::Planned(preview) => &preview.workflow_id,
            OrchestrationOutcome::Failed(failure) => &failure.workflow_id,
        }
    }

    /// Invocation records; empty for dry runs and failures
    pub fn executions(&self) -> &[AgentExecution] {
        match self {
            OrchestrationOutcome::Executed(result) => &result.executions,
            _ => &[],
        }
    }

    /// Agents involved: dispatched for live runs, selected for dry runs
    pub fn total_agents(&self) -> usize {
        match self {
            OrchestrationOutcome::Executed(result) => result.total_agents,
            OrchestrationOutcome::Planned(preview) => preview.selected_capabilities.len(),
            OrchestrationOutcome::Failed(_) => 0,
        }
    }

    /// Wall-clock duration of the orchestration call
    pub fn duration_seconds(&self) -> f64 {
        match self {
            OrchestrationOutcome::Executed(result) => result.workflow_duration_seconds,
            OrchestrationOutcome::Planned(_) => 0.0,
            OrchestrationOutcome::Failed(failure) => failure.workflow_duration_seconds,
        }
    }
}
