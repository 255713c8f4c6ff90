//! Configuration for schemectl

use crate::error::{SchemeError, SchemeResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main schemectl configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemectlConfig {
    /// File locations scanned for schemes
    #[serde(default)]
    pub paths: ConfigPaths,
    /// External interface-control commands
    #[serde(default)]
    pub commands: CommandPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPaths {
    /// Primary interfaces file
    #[serde(default = "default_interfaces")]
    pub interfaces: PathBuf,
    /// Per-scheme override directory
    #[serde(default = "default_interfaces_d")]
    pub interfaces_d: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandPaths {
    /// Command that brings a scheme up
    #[serde(default = "default_ifup")]
    pub ifup: PathBuf,
    /// Command that brings an interface down
    #[serde(default = "default_ifdown")]
    pub ifdown: PathBuf,
}

fn default_interfaces() -> PathBuf {
    PathBuf::from("/etc/network/interfaces")
}

fn default_interfaces_d() -> PathBuf {
    PathBuf::from("/etc/network/interfaces.d")
}

fn default_ifup() -> PathBuf {
    PathBuf::from("/sbin/ifup")
}

fn default_ifdown() -> PathBuf {
    PathBuf::from("/sbin/ifdown")
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            interfaces: default_interfaces(),
            interfaces_d: default_interfaces_d(),
        }
    }
}

impl Default for CommandPaths {
    fn default() -> Self {
        Self {
            ifup: default_ifup(),
            ifdown: default_ifdown(),
        }
    }
}

impl Default for SchemectlConfig {
    fn default() -> Self {
        Self {
            paths: ConfigPaths::default(),
            commands: CommandPaths::default(),
        }
    }
}

impl SchemectlConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> SchemeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SchemeError::ConfigError(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SchemeError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SchemeResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SchemeError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| SchemeError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
