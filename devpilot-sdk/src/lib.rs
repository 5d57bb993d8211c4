// Integration contract for the devpilot platform.
//
// Everything an external capability-executor implementation or a supervising
// process needs: the workflow specification record, the executor trait, and
// the structured event stream format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Re-export async trait for executor implementations
pub use async_trait::async_trait;

// ============================================================================
// Workflow Specification
// ============================================================================

/// Workflow execution priority levels
///
/// Advisory only: priority does not change scheduling order inside a
/// workflow, it is carried for callers that queue workflows externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

/// A single task carried by a workflow specification
///
/// Opaque to the orchestrator: task descriptors are passed through to
/// capability invocations unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Task name
    pub name: String,

    /// Task type label
    #[serde(rename = "type")]
    pub task_type: String,
}

/// Specification for one workflow orchestration request
///
/// Built by a caller, consumed exactly once by the orchestrator, never
/// mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSpecification {
    /// Workflow name, used to look up default capability sets
    pub name: String,

    /// Target project path (must be non-empty)
    pub target_path: String,

    /// Maximum agents to select; 0 means the platform default
    pub max_agents: u32,

    /// Execution priority (advisory)
    #[serde(default)]
    pub priority: WorkflowPriority,

    /// Plan only, dispatch nothing
    #[serde(default)]
    pub dry_run: bool,

    /// Emit structured progress events on stderr during execution
    #[serde(default)]
    pub monitoring: bool,

    /// Task descriptors, passed through to invocations
    #[serde(default)]
    pub tasks: Vec<TaskDescriptor>,

    /// Task name -> names of tasks that must complete first
    #[serde(default)]
    pub dependencies: HashMap<String, Vec<String>>,

    /// Capability tags that must participate in the workflow
    #[serde(default)]
    pub required_capabilities: Vec<String>,

    /// Capability tags to include while room remains
    #[serde(default)]
    pub preferred_capabilities: Vec<String>,

    /// Overall workflow deadline in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for WorkflowSpecification {
    fn default() -> Self {
        Self {
            name: String::new(),
            target_path: ".".to_string(),
            max_agents: 0,
            priority: WorkflowPriority::Normal,
            dry_run: false,
            monitoring: false,
            tasks: Vec::new(),
            dependencies: HashMap::new(),
            required_capabilities: Vec::new(),
            preferred_capabilities: Vec::new(),
            timeout: None,
        }
    }
}

// ============================================================================
// Capability Executor Contract
// ============================================================================

/// Success payload returned by a capability invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityOutput {
    /// Free-form output text produced by the capability
    pub output: String,

    /// Recommendations for the caller, merged and deduplicated downstream
    #[serde(default)]
    pub recommendations: Vec<String>,

    /// Resource units consumed by the invocation (token stand-in)
    #[serde(default)]
    pub resource_units: u64,
}

/// Context describing where in the execution plan an invocation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseContext {
    /// Phase position in the plan (0-indexed)
    pub phase: usize,

    /// Phase name ("analysis", "implementation", "validation")
    pub name: String,

    /// Total number of phases in the plan
    pub total_phases: usize,
}

/// Result type for capability invocations
pub type CapabilityResult = Result<CapabilityOutput, Box<dyn std::error::Error + Send + Sync>>;

/// The single point where the orchestrator calls out to whatever actually
/// performs agent work.
///
/// Implementations may wrap an LLM session, a subprocess, or a test double;
/// the dispatcher only relies on the two outcomes of [`CapabilityResult`].
/// Invocations for one phase run concurrently, so implementations must be
/// safe to call from multiple tasks at once.
#[async_trait]
pub trait CapabilityExecutor: Send + Sync {
    async fn invoke(
        &self,
        capability: &str,
        spec: &WorkflowSpecification,
        context: &PhaseContext,
    ) -> CapabilityResult;
}

// ============================================================================
// Structured Event Stream
// ============================================================================

/// Structured progress events emitted during orchestration
///
/// Events are written to stderr as `__DEVPILOT_EVENT__:<json>` lines so a
/// supervising process can track execution without parsing human output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestrationEvent {
    /// Workflow accepted and starting
    WorkflowStarted {
        workflow_id: String,
        workflow: String,
    },
    /// Workflow finished (live or dry-run)
    WorkflowCompleted {
        workflow_id: String,
        success: bool,
        duration_seconds: f64,
    },
    /// Workflow rejected or aborted by an internal error
    WorkflowFailed {
        workflow_id: String,
        error: String,
    },
    /// Phase dispatch starting
    PhaseStarted {
        phase: usize,
        name: String,
        total_phases: usize,
    },
    /// All invocations of a phase reached a terminal state
    PhaseCompleted {
        phase: usize,
        name: String,
    },
    /// Capability invocation launched
    AgentStarted {
        agent_id: String,
        capability: String,
        task_id: String,
    },
    /// Capability invocation completed
    AgentCompleted {
        agent_id: String,
        capability: String,
        execution_time_seconds: f64,
    },
    /// Capability invocation failed
    AgentFailed {
        agent_id: String,
        capability: String,
        error: String,
    },
    /// Capability invocation cut off by the workflow deadline
    AgentTimedOut {
        agent_id: String,
        capability: String,
    },
}

impl OrchestrationEvent {
    /// Emit this event to stderr for supervising processes
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            use std::io::Write;
            eprintln!("__DEVPILOT_EVENT__:{}", json);
            // Force flush stderr in async/concurrent contexts
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for orchestration event logging
#[macro_export]
macro_rules! log_workflow_start {
    ($workflow_id:expr, $workflow:expr) => {
        $crate::OrchestrationEvent::WorkflowStarted {
            workflow_id: $workflow_id.to_string(),
            workflow: $workflow.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_workflow_complete {
    ($workflow_id:expr, $success:expr, $duration:expr) => {
        $crate::OrchestrationEvent::WorkflowCompleted {
            workflow_id: $workflow_id.to_string(),
            success: $success,
            duration_seconds: $duration,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_workflow_failed {
    ($workflow_id:expr, $error:expr) => {
        $crate::OrchestrationEvent::WorkflowFailed {
            workflow_id: $workflow_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr, $total:expr) => {
        $crate::OrchestrationEvent::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr) => {
        $crate::OrchestrationEvent::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_start {
    ($agent_id:expr, $capability:expr, $task_id:expr) => {
        $crate::OrchestrationEvent::AgentStarted {
            agent_id: $agent_id.to_string(),
            capability: $capability.to_string(),
            task_id: $task_id.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_complete {
    ($agent_id:expr, $capability:expr, $seconds:expr) => {
        $crate::OrchestrationEvent::AgentCompleted {
            agent_id: $agent_id.to_string(),
            capability: $capability.to_string(),
            execution_time_seconds: $seconds,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_failed {
    ($agent_id:expr, $capability:expr, $error:expr) => {
        $crate::OrchestrationEvent::AgentFailed {
            agent_id: $agent_id.to_string(),
            capability: $capability.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_timeout {
    ($agent_id:expr, $capability:expr) => {
        $crate::OrchestrationEvent::AgentTimedOut {
            agent_id: $agent_id.to_string(),
            capability: $capability.to_string(),
        }
        .emit();
    };
}
