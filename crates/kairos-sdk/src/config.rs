//! Configuration types for SchedulingEngine

use crate::error::{Result, SdkError};
use kairos_core::ast::DEFAULT_MAX_DEPTH;
use kairos_validator::{RulesPolicy, SchedulingPolicy};
use serde::{Deserialize, Serialize};

/// Main engine configuration
///
/// Every section has defaults, so an empty document is a valid config:
///
/// ```rust
/// use kairos_sdk::EngineConfig;
///
/// let config = EngineConfig::from_yaml("scheduling:\n  min_duration_minutes: 30\n").unwrap();
/// assert_eq!(config.scheduling.min_duration_minutes, 30);
/// assert_eq!(config.rules.required_requester_types.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Business constraints on rules documents and requester types
    pub rules: RulesPolicy,

    /// Constraints on candidate events
    pub scheduling: SchedulingPolicy,

    /// AST view options
    pub ast: AstOptions,
}

impl EngineConfig {
    /// Create a new engine configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SdkError::ConfigError(format!("Invalid engine config: {}", e)))
    }

    pub fn with_rules_policy(mut self, rules: RulesPolicy) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_scheduling_policy(mut self, scheduling: SchedulingPolicy) -> Self {
        self.scheduling = scheduling;
        self
    }

    /// Set the depth limit of AST views
    pub fn with_ast_max_depth(mut self, max_depth: usize) -> Self {
        self.ast.max_depth = max_depth;
        self
    }

    /// Reject configurations no document could satisfy
    pub fn validate(&self) -> Result<()> {
        if self.scheduling.min_duration_minutes >= 24 * 60 {
            return Err(SdkError::ConfigError(format!(
                "scheduling.min_duration_minutes must be below 1440, got {}",
                self.scheduling.min_duration_minutes
            )));
        }
        if self.ast.max_depth == 0 {
            return Err(SdkError::ConfigError(
                "ast.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options of the AST debug view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstOptions {
    /// Recursion limit of the JSON tree conversion
    pub max_depth: usize,
}

impl Default for AstOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
