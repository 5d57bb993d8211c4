//! Workflow orchestration façade
//!
//! This module contains the top-level entry point that ties the pipeline
//! together: validate the specification, select capabilities, build the
//! phased plan, then either stop with a preview (dry run) or dispatch the
//! plan and aggregate the results.
//!
//! The primary entry point is [`AgentOrchestrator::orchestrate_workflow`].

use anyhow::Result;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use devpilot_sdk::{
    log_workflow_complete, log_workflow_failed, log_workflow_start, CapabilityExecutor,
    WorkflowSpecification,
};

use crate::config::PlatformConfig;
use crate::orchestration::aggregate::aggregate_results;
use crate::orchestration::dispatch::execute_plan;
use crate::orchestration::executor::SimulatedExecutor;
use crate::orchestration::plan::{estimate_resource_units, plan_execution};
use crate::orchestration::registry::CapabilityRegistry;
use crate::orchestration::select::select_capabilities;
use crate::orchestration::types::{
    ExecutionPreview, OrchestrationFailure, OrchestrationOutcome, OrchestrationResult,
};
use crate::orchestration::validate::validate_spec;

/// Coordinates multiple agents for one workflow at a time.
///
/// Holds the immutable platform configuration, the capability registry
/// derived from it, and the injected capability executor. One orchestrator
/// serves any number of sequential or concurrent workflow calls; calls
/// share nothing beyond the read-only registry and the id counter.
///
/// # Examples
///
/// ```no_run
/// use devpilot::orchestration::AgentOrchestrator;
/// use devpilot_sdk::WorkflowSpecification;
///
/// # async fn example() {
/// let orchestrator = AgentOrchestrator::with_defaults();
///
/// let spec = WorkflowSpecification {
///     name: "feature-development".to_string(),
///     target_path: "./my-project".to_string(),
///     max_agents: 5,
///     required_capabilities: vec!["backend-developer".to_string()],
///     ..Default::default()
/// };
///
/// let outcome = orchestrator.orchestrate_workflow(spec).await;
/// println!("{}: success={}", outcome.workflow_id(), outcome.success());
/// # }
/// ```
pub struct AgentOrchestrator {
    config: PlatformConfig,
    registry: CapabilityRegistry,
    executor: Arc<dyn CapabilityExecutor>,
    workflow_seq: AtomicU64,
}

impl AgentOrchestrator {
    /// Create an orchestrator with an injected capability executor
    pub fn new(config: PlatformConfig, executor: Arc<dyn CapabilityExecutor>) -> Self {
        let registry = CapabilityRegistry::from_config(&config);
        Self {
            config,
            registry,
            executor,
            workflow_seq: AtomicU64::new(0),
        }
    }

    /// Create an orchestrator with default configuration and the simulated
    /// executor
    pub fn with_defaults() -> Self {
        Self::new(
            PlatformConfig::default(),
            Arc::new(SimulatedExecutor::default()),
        )
    }

    /// The capability registry this orchestrator validates against
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Execute a workflow specification to a structured outcome.
    ///
    /// This never returns an error and never panics across the boundary:
    /// validation rejections and internal errors both come back as
    /// [`OrchestrationOutcome::Failed`], invocation failures come back
    /// inside [`OrchestrationOutcome::Executed`] with `success == false`.
    pub async fn orchestrate_workflow(&self, spec: WorkflowSpecification) -> OrchestrationOutcome {
        let workflow_id = self.next_workflow_id();
        let monitoring = spec.monitoring;
        let started = Instant::now();

        if monitoring {
            log_workflow_start!(&workflow_id, &spec.name);
        }

        match self.run_workflow(&workflow_id, &spec, started).await {
            Ok(outcome) => {
                if monitoring {
                    log_workflow_complete!(
                        &workflow_id,
                        outcome.success(),
                        started.elapsed().as_secs_f64()
                    );
                }
                outcome
            }
            Err(error) => {
                if monitoring {
                    log_workflow_failed!(&workflow_id, error);
                }
                OrchestrationOutcome::Failed(OrchestrationFailure {
                    workflow_id,
                    error: error.to_string(),
                    workflow_duration_seconds: started.elapsed().as_secs_f64(),
                    timestamp: Utc::now(),
                })
            }
        }
    }

    async fn run_workflow(
        &self,
        workflow_id: &str,
        spec: &WorkflowSpecification,
        started: Instant,
    ) -> Result<OrchestrationOutcome> {
        // Fail fast before any dispatch
        validate_spec(spec, &self.registry, &self.config)?;

        let selected = select_capabilities(spec, &self.registry, self.config.default_max_agents);
        let plan = plan_execution(&selected);

        if spec.dry_run {
            return Ok(OrchestrationOutcome::Planned(ExecutionPreview {
                workflow_id: workflow_id.to_string(),
                workflow: spec.name.clone(),
                selected_capabilities: selected,
                estimated_duration_seconds: plan.estimated_duration_seconds(),
                estimated_resource_units: estimate_resource_units(&plan),
                plan,
                timestamp: Utc::now(),
            }));
        }

        let executions =
            execute_plan(&plan, spec, self.executor.clone(), self.deadline_for(spec)).await;
        let output = aggregate_results(&executions);
        let completed_agents = output.successful_agents;
        let failed_agents = output.failed_agents;
        let total_resource_units = executions
            .iter()
            .map(|execution| execution.resource_units_used)
            .sum();

        Ok(OrchestrationOutcome::Executed(OrchestrationResult {
            workflow_id: workflow_id.to_string(),
            success: failed_agents == 0,
            total_agents: executions.len(),
            completed_agents,
            failed_agents,
            executions,
            workflow_duration_seconds: started.elapsed().as_secs_f64(),
            total_resource_units,
            output,
            timestamp: Utc::now(),
        }))
    }

    /// Fresh id per call: UTC timestamp plus a process-monotonic sequence,
    /// so two calls within the same second still get distinct ids
    fn next_workflow_id(&self) -> String {
        let seq = self.workflow_seq.fetch_add(1, Ordering::Relaxed);
        format!("workflow_{}_{}", Utc::now().format("%Y%m%d_%H%M%S"), seq)
    }

    /// Absolute deadline for a live run, from the specification's timeout
    /// or the platform fallback ceiling
    fn deadline_for(&self, spec: &WorkflowSpecification) -> Option<Instant> {
        spec.timeout
            .or(self.config.default_timeout_seconds)
            .map(|seconds| Instant::now() + Duration::from_secs(seconds))
    }
}
