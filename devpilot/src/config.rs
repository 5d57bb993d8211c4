//! Platform configuration: orchestration limits and capability registry data

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Platform-wide orchestration settings
///
/// Loaded once at startup and injected into the orchestrator; never mutated
/// afterwards, so one instance can back any number of concurrent workflow
/// calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Hard ceiling on agents a single workflow may request
    pub max_agents_per_workflow: u32,

    /// Agent count used when a specification asks for "auto" (max_agents == 0)
    pub default_max_agents: u32,

    /// Fallback workflow deadline applied when a specification carries none
    pub default_timeout_seconds: Option<u64>,

    /// Capability tags the platform can dispatch to
    pub available_capabilities: Vec<String>,

    /// Default capability sets per workflow name, used to fill unfilled slots
    pub workflow_capability_defaults: HashMap<String, Vec<String>>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            max_agents_per_workflow: 20,
            default_max_agents: 5,
            default_timeout_seconds: Some(3600),
            available_capabilities: [
                "system-architect",
                "backend-developer",
                "frontend-developer",
                "database-specialist",
                "security-auditor",
                "performance-optimizer",
                "devops-engineer",
                "test-strategist",
                "code-quality-analyzer",
                "ui-ux-designer",
                "api-designer",
                "documentation-specialist",
                "debugger",
                "general-purpose",
                "llm-ai-agents-and-eng-research",
                "meta-agent",
                "work-completion-summary",
            ]
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
            workflow_capability_defaults: [
                (
                    "full-stack-setup",
                    vec![
                        "system-architect",
                        "backend-developer",
                        "frontend-developer",
                        "database-specialist",
                        "devops-engineer",
                        "security-auditor",
                    ],
                ),
                (
                    "feature-development",
                    vec![
                        "backend-developer",
                        "frontend-developer",
                        "test-strategist",
                        "code-quality-analyzer",
                        "ui-ux-designer",
                    ],
                ),
                (
                    "bug-investigation",
                    vec![
                        "debugger",
                        "code-quality-analyzer",
                        "test-strategist",
                        "general-purpose",
                    ],
                ),
                (
                    "performance-optimization",
                    vec![
                        "performance-optimizer",
                        "database-specialist",
                        "backend-developer",
                        "frontend-developer",
                        "devops-engineer",
                    ],
                ),
                (
                    "security-hardening",
                    vec![
                        "security-auditor",
                        "backend-developer",
                        "devops-engineer",
                        "code-quality-analyzer",
                    ],
                ),
            ]
            .into_iter()
            .map(|(name, tags)| {
                (
                    name.to_string(),
                    tags.into_iter().map(|tag| tag.to_string()).collect(),
                )
            })
            .collect(),
        }
    }
}

impl PlatformConfig {
    /// Load configuration from a YAML file
    ///
    /// Missing fields fall back to the built-in defaults, so a config file
    /// only has to state what it overrides.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML from: {}", path.display()))
    }
}
