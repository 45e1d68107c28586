/*!
 * Environments module contains the runtime environment presets the harness
 * can run against.
 *
 * A preset names a deployment shape (`local` for host-network KERIA,
 * `docker` for the compose network) and carries the KERIA endpoint defaults
 * for it. Process environment variables can override individual endpoints.
 */

use crate::errors::{Result, WorkflowError};
use serde::{Deserialize, Serialize};
use std::{env, fmt};

/// Runtime environment presets supported by the harness
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentPreset {
    Local,
    Docker,
}

impl fmt::Display for EnvironmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentPreset::Local => write!(f, "local"),
            EnvironmentPreset::Docker => write!(f, "docker"),
        }
    }
}

impl TryFrom<&str> for EnvironmentPreset {
    type Error = WorkflowError;

    fn try_from(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "local" => Ok(EnvironmentPreset::Local),
            "docker" => Ok(EnvironmentPreset::Docker),
            _ => Err(WorkflowError::Environment(format!(
                "Unknown environment preset ({value}), expected local or docker"
            ))),
        }
    }
}

/// Resolved endpoint configuration for a harness run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowEnvironment {
    pub preset: EnvironmentPreset,

    /// KERIA agent admin interface
    pub keria_admin_url: String,

    /// KERIA agent boot interface
    pub keria_boot_url: String,
}

impl WorkflowEnvironment {
    /// Endpoint defaults for a preset
    pub fn from_preset(preset: EnvironmentPreset) -> Self {
        match preset {
            EnvironmentPreset::Local => WorkflowEnvironment {
                preset,
                keria_admin_url: "http://127.0.0.1:3901".to_string(),
                keria_boot_url: "http://127.0.0.1:3903".to_string(),
            },
            EnvironmentPreset::Docker => WorkflowEnvironment {
                preset,
                keria_admin_url: "http://keria:3901".to_string(),
                keria_boot_url: "http://keria:3903".to_string(),
            },
        }
    }

    /// Apply `KERIA_URL` / `KERIA_BOOT_URL` process environment overrides
    /// over the preset defaults
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(env::var("KERIA_URL").ok(), env::var("KERIA_BOOT_URL").ok())
    }

    fn apply_overrides(mut self, admin_url: Option<String>, boot_url: Option<String>) -> Self {
        if let Some(admin_url) = admin_url {
            self.keria_admin_url = admin_url;
        }
        if let Some(boot_url) = boot_url {
            self.keria_boot_url = boot_url;
        }
        self
    }
}
