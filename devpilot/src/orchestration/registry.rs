//! Capability registry shared across workflow invocations

use std::collections::{HashMap, HashSet};

use crate::config::PlatformConfig;

/// Generic default capability set for unrecognized workflow names
const GENERIC_DEFAULTS: [&str; 3] = ["general-purpose", "backend-developer", "frontend-developer"];

/// Read-only registry of known capability tags and per-workflow defaults
///
/// Built once from [`PlatformConfig`] and shared freely: reads need no
/// synchronization because the registry is never mutated after construction.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    available: Vec<String>,
    known: HashSet<String>,
    workflow_defaults: HashMap<String, Vec<String>>,
}

impl CapabilityRegistry {
    /// Build a registry from platform configuration
    pub fn from_config(config: &PlatformConfig) -> Self {
        Self {
            available: config.available_capabilities.clone(),
            known: config.available_capabilities.iter().cloned().collect(),
            workflow_defaults: config.workflow_capability_defaults.clone(),
        }
    }

    /// Whether a capability tag can be dispatched on this platform
    pub fn is_known(&self, tag: &str) -> bool {
        self.known.contains(tag)
    }

    /// Tags from `required` that the platform does not know, in given order
    pub fn missing_from(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|tag| !self.is_known(tag))
            .cloned()
            .collect()
    }

    /// Default capability list for a workflow name
    ///
    /// Unrecognized names fall back to the generic default set.
    pub fn defaults_for(&self, workflow_name: &str) -> Vec<String> {
        self.workflow_defaults
            .get(workflow_name)
            .cloned()
            .unwrap_or_else(|| GENERIC_DEFAULTS.iter().map(|tag| tag.to_string()).collect())
    }

    /// All known capability tags, configuration order
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Workflow names that carry a default capability set
    pub fn workflow_names(&self) -> impl Iterator<Item = &String> {
        self.workflow_defaults.keys()
    }
}
