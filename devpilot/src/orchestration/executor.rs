//! Simulated capability execution

use std::time::Duration;

use devpilot_sdk::{
    async_trait, CapabilityExecutor, CapabilityOutput, CapabilityResult, PhaseContext,
    WorkflowSpecification,
};

/// Deterministic stand-in for real agent infrastructure.
///
/// Every invocation sleeps for the configured delay and returns a canned
/// completion with one recommendation and a flat resource charge. Used by
/// the CLI until a real executor is wired in, and as a baseline in tests.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    /// Simulated work duration per invocation
    pub delay: Duration,

    /// Resource units charged per completed invocation
    pub resource_units: u64,
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
            resource_units: 100,
        }
    }
}

#[async_trait]
impl CapabilityExecutor for SimulatedExecutor {
    async fn invoke(
        &self,
        capability: &str,
        _spec: &WorkflowSpecification,
        context: &PhaseContext,
    ) -> CapabilityResult {
        tokio::time::sleep(self.delay).await;

        Ok(CapabilityOutput {
            output: format!("Completed {} task for {}", capability, context.name),
            recommendations: vec![format!("Recommendation from {}", capability)],
            resource_units: self.resource_units,
        })
    }
}
