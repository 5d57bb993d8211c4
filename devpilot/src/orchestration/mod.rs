//! Agent orchestration module
//!
//! This module executes declarative multi-agent workflows: a specification
//! is validated against the capability registry, capabilities are selected
//! and partitioned into sequential phases, invocations within each phase
//! run concurrently, and the per-agent outcomes are merged into one result.

pub mod aggregate;
pub mod dispatch;
pub mod executor;
pub mod plan;
pub mod registry;
pub mod select;
pub mod types;
pub mod validate;

mod orchestrator;

// Re-export commonly used items
pub use aggregate::aggregate_results;
pub use dispatch::execute_plan;
pub use executor::SimulatedExecutor;
pub use orchestrator::AgentOrchestrator;
pub use plan::plan_execution;
pub use registry::CapabilityRegistry;
pub use select::select_capabilities;
pub use types::{
    AgentExecution, AgentStatus, AggregatedOutput, ExecutionPhase, ExecutionPlan,
    ExecutionPreview, OrchestrationFailure, OrchestrationOutcome, OrchestrationResult,
};
pub use validate::{validate_spec, ValidationError, ValidationFailure};
