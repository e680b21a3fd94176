//! Top-level configuration.

use serde::{Deserialize, Serialize};

use vaultsync_reconcile::ReconcileConfig;

use crate::error::ConfigError;

/// Configuration for an [`Orchestrator`](crate::Orchestrator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultsyncConfig {
    /// Reconciler settings.
    pub reconcile: ReconcileConfig,
}

impl VaultsyncConfig {
    /// Load from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reconcile.resource_type_slug.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reconcile.resource_type_slug must not be empty".into(),
            ));
        }
        Ok(())
    }
}
