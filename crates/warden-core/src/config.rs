//! Adapter configuration
//!
//! Loaded from a TOML file and overridable through `WARDEN_`-prefixed
//! environment variables.

use crate::errors::{Result, WardenError};
use crate::types::UnwrapperId;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WARDEN_";

/// Address that marks the start of module pagination; never a valid module
pub const SENTINEL_MODULE: Address = Address::with_last_byte(1);

/// Unwrapper implementation to install for a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnwrapperKind {
    /// Payload is a bare packed batch
    Packed,
    /// Payload is `multiSend(bytes)` calldata wrapping a packed batch
    Multisend,
}

/// One configured unwrapper binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwrapperConfig {
    /// Call target whose delegated requests are unwrapped
    pub target: Address,
    /// Identity of the unwrapper
    pub unwrapper: UnwrapperId,
    /// Implementation to install
    pub kind: UnwrapperKind,
}

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Administrative identity
    pub owner: Address,
    /// Modules enabled at construction
    pub modules: Vec<Address>,
    /// Unwrapper bindings installed at construction
    pub unwrappers: Vec<UnwrapperConfig>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            owner: Address::ZERO,
            modules: Vec::new(),
            unwrappers: Vec::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WardenError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from `WARDEN_`-prefixed key/value pairs
    ///
    /// Recognized keys are `WARDEN_OWNER` and `WARDEN_LOG_FILTER`; anything
    /// else with the prefix is ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "OWNER" => {
                    self.owner = value.as_ref().parse().map_err(|e| {
                        WardenError::config(format!("Invalid {ENV_PREFIX}OWNER: {e}"))
                    })?;
                }
                "LOG_FILTER" => self.log_filter = value.as_ref().to_string(),
                other => tracing::debug!(key = other, "Ignoring unknown config override"),
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.owner == Address::ZERO {
            return Err(WardenError::config("owner must be set"));
        }

        let mut targets = HashSet::new();
        for binding in &self.unwrappers {
            if binding.unwrapper == Address::ZERO {
                return Err(WardenError::config(format!(
                    "unwrapper for target {} must be non-zero",
                    binding.target
                )));
            }
            if !targets.insert(binding.target) {
                return Err(WardenError::config(format!(
                    "target {} is bound more than once",
                    binding.target
                )));
            }
        }

        for module in &self.modules {
            if *module == Address::ZERO || *module == SENTINEL_MODULE {
                return Err(WardenError::InvalidModule { module: *module });
            }
        }
        Ok(())
    }
}
