//! Operator-wide resource defaults
//!
//! The hosting process loads these once at startup, validates them, and
//! passes them by reference into every resolution call. The core never
//! reads ambient global state.

use crate::models::{Quantity, QuantityError};
use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix for operator configuration
const ENV_PREFIX: &str = "BACKUP";

/// Global fallback resource requirements, one optional quantity per
/// dimension. Applied only where neither the job invocation nor the
/// resource's template specifies the dimension.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalDefaults {
    /// Fallback CPU request (`BACKUP_CPU_REQUEST`)
    #[serde(default)]
    pub cpu_request: Option<Quantity>,

    /// Fallback CPU limit (`BACKUP_CPU_LIMIT`)
    #[serde(default)]
    pub cpu_limit: Option<Quantity>,

    /// Fallback memory request (`BACKUP_MEMORY_REQUEST`)
    #[serde(default)]
    pub memory_request: Option<Quantity>,

    /// Fallback memory limit (`BACKUP_MEMORY_LIMIT`)
    #[serde(default)]
    pub memory_limit: Option<Quantity>,
}

impl GlobalDefaults {
    /// Load global defaults from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let defaults: GlobalDefaults = config.try_deserialize().unwrap_or_default();
        defaults.validate()?;
        Ok(defaults)
    }

    /// Check that every present quantity is syntactically valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("cpu_request", &self.cpu_request),
            ("cpu_limit", &self.cpu_limit),
            ("memory_request", &self.memory_request),
            ("memory_limit", &self.memory_limit),
        ];
        for (field, value) in fields {
            if let Some(quantity) = value {
                Quantity::parse(quantity.as_str()).map_err(|source| ConfigError::InvalidQuantity {
                    field,
                    source,
                })?;
            }
        }
        Ok(())
    }
}

/// Configuration validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid quantity for global default {field}")]
    InvalidQuantity {
        field: &'static str,
        #[source]
        source: QuantityError,
    },
}
