//! Capability selection for a workflow

use devpilot_sdk::WorkflowSpecification;

use crate::orchestration::registry::CapabilityRegistry;

/// Choose the capabilities a workflow will dispatch, in invocation order.
///
/// Three priority tiers, insertion order preserved throughout:
///
/// 1. Required capabilities, always included even past the size limit
/// 2. Preferred capabilities (known tags only), while room remains
/// 3. The workflow-type default list from the registry, while room remains
///
/// The result never contains a duplicate tag and never exceeds
/// `max(effective_max, |required|)`, where the effective limit is the
/// specification's `max_agents` or the platform default when it is 0.
pub fn select_capabilities(
    spec: &WorkflowSpecification,
    registry: &CapabilityRegistry,
    default_max_agents: u32,
) -> Vec<String> {
    let effective_max = if spec.max_agents > 0 {
        spec.max_agents as usize
    } else {
        default_max_agents as usize
    };

    let mut selected: Vec<String> = Vec::new();

    // Required capabilities always win, even over the size limit
    for tag in &spec.required_capabilities {
        if !selected.contains(tag) {
            selected.push(tag.clone());
        }
    }

    for tag in &spec.preferred_capabilities {
        if selected.len() >= effective_max {
            break;
        }
        if registry.is_known(tag) && !selected.contains(tag) {
            selected.push(tag.clone());
        }
    }

    for tag in registry.defaults_for(&spec.name) {
        if selected.len() >= effective_max {
            break;
        }
        if !selected.contains(&tag) {
            selected.push(tag);
        }
    }

    selected
}
