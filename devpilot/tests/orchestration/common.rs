//! Common test fixtures for orchestration tests

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use devpilot_sdk::{
    async_trait, CapabilityExecutor, CapabilityOutput, CapabilityResult, PhaseContext,
    WorkflowSpecification,
};

/// Deterministic capability executor for tests
///
/// Invocations sleep for a short fixed delay and succeed with a canned
/// output, except for capabilities scripted to fail (error) or stall
/// (sleep far past any test deadline). Every invocation is recorded.
pub struct ScriptedExecutor {
    pub delay: Duration,
    pub failures: HashSet<String>,
    pub stalls: HashSet<String>,
    pub invocations: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(20),
            failures: HashSet::new(),
            stalls: HashSet::new(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(capabilities: &[&str]) -> Self {
        let mut executor = Self::new();
        executor.failures = capabilities.iter().map(|tag| tag.to_string()).collect();
        executor
    }

    pub fn stalling(capabilities: &[&str]) -> Self {
        let mut executor = Self::new();
        executor.stalls = capabilities.iter().map(|tag| tag.to_string()).collect();
        executor
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

#[async_trait]
impl CapabilityExecutor for ScriptedExecutor {
    async fn invoke(
        &self,
        capability: &str,
        _spec: &WorkflowSpecification,
        context: &PhaseContext,
    ) -> CapabilityResult {
        self.invocations.lock().unwrap().push(capability.to_string());

        if self.stalls.contains(capability) {
            // Far beyond any test deadline; the dispatcher aborts this task
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        tokio::time::sleep(self.delay).await;

        if self.failures.contains(capability) {
            return Err(format!("{} exploded", capability).into());
        }

        Ok(CapabilityOutput {
            output: format!("Completed {} task for {}", capability, context.name),
            recommendations: vec![format!("Recommendation from {}", capability)],
            resource_units: 100,
        })
    }
}

/// Minimal valid specification for the given workflow name
pub fn sample_spec(name: &str) -> WorkflowSpecification {
    WorkflowSpecification {
        name: name.to_string(),
        target_path: "./project".to_string(),
        ..Default::default()
    }
}

/// Owned capability tag list from string literals
pub fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
