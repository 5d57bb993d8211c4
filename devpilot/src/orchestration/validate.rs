//! Workflow specification validation

use thiserror::Error;

use devpilot_sdk::WorkflowSpecification;

use crate::config::PlatformConfig;
use crate::orchestration::registry::CapabilityRegistry;

/// A single constraint violation in a workflow specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown capabilities required: {}", .missing.join(", "))]
    UnknownCapability { missing: Vec<String> },

    #[error("too many agents requested: {requested} (platform limit is {limit})")]
    CapacityExceeded { requested: u32, limit: u32 },

    #[error("target path is required")]
    InvalidTarget,
}

/// Every violation found in one specification, reported together
///
/// Validation checks all constraints before failing so a caller can fix a
/// bad specification in one pass instead of resubmitting per violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|violation| violation.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "workflow validation failed: {}", joined)
    }
}

impl std::error::Error for ValidationFailure {}

/// Check a specification against platform constraints
///
/// Pure: no side effects, no dispatch. A failed validation means the
/// workflow never starts.
pub fn validate_spec(
    spec: &WorkflowSpecification,
    registry: &CapabilityRegistry,
    config: &PlatformConfig,
) -> Result<(), ValidationFailure> {
    let mut violations = Vec::new();

    let missing = registry.missing_from(&spec.required_capabilities);
    if !missing.is_empty() {
        violations.push(ValidationError::UnknownCapability { missing });
    }

    if spec.max_agents > config.max_agents_per_workflow {
        violations.push(ValidationError::CapacityExceeded {
            requested: spec.max_agents,
            limit: config.max_agents_per_workflow,
        });
    }

    if spec.target_path.trim().is_empty() {
        violations.push(ValidationError::InvalidTarget);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { violations })
    }
}
