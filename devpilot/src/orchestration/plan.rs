//! Phased execution planning

use crate::orchestration::types::{ExecutionPhase, ExecutionPlan};

/// Fixed duration estimate for the analysis phase
pub const ANALYSIS_PHASE_SECONDS: u64 = 300;
/// Fixed duration estimate for the implementation phase
pub const IMPLEMENTATION_PHASE_SECONDS: u64 = 900;
/// Fixed duration estimate for the validation phase
pub const VALIDATION_PHASE_SECONDS: u64 = 300;

/// Capabilities that always run in the closing validation phase
pub const VALIDATION_CAPABILITIES: [&str; 2] = ["test-strategist", "code-quality-analyzer"];

/// Coarse resource estimate per planned invocation
const RESOURCE_UNITS_PER_INVOCATION: u64 = 100;

/// How many selected capabilities the analysis phase takes
const ANALYSIS_PHASE_WIDTH: usize = 3;

/// Partition selected capabilities into the canonical phase sequence.
///
/// The partition is fixed: the first up-to-three capabilities form the
/// analysis phase, the remainder forms the implementation phase (omitted
/// when empty), and the constant validation pair closes every plan. The
/// validation phase is appended without cross-phase deduplication, so a tag
/// selected for an earlier phase is invoked again there.
///
/// Pure and deterministic; the dry-run and live paths share the same plan.
pub fn plan_execution(selected: &[String]) -> ExecutionPlan {
    let mut phases = Vec::new();

    let split = selected.len().min(ANALYSIS_PHASE_WIDTH);
    phases.push(ExecutionPhase {
        name: "analysis".to_string(),
        capabilities: selected[..split].to_vec(),
        estimated_duration_seconds: ANALYSIS_PHASE_SECONDS,
    });

    if selected.len() > split {
        phases.push(ExecutionPhase {
            name: "implementation".to_string(),
            capabilities: selected[split..].to_vec(),
            estimated_duration_seconds: IMPLEMENTATION_PHASE_SECONDS,
        });
    }

    phases.push(ExecutionPhase {
        name: "validation".to_string(),
        capabilities: VALIDATION_CAPABILITIES
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
        estimated_duration_seconds: VALIDATION_PHASE_SECONDS,
    });

    ExecutionPlan { phases }
}

/// Coarse resource usage estimate for a plan
pub fn estimate_resource_units(plan: &ExecutionPlan) -> u64 {
    plan.planned_invocations() as u64 * RESOURCE_UNITS_PER_INVOCATION
}
