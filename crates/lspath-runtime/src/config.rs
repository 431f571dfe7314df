use crate::{Error, Result};
use lspath_core::expand_tilde;
use lspath_types::ShellFamily;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// PATH handed to the traced shell so that startup files rebuild it from scratch.
pub const DEFAULT_BASELINE: &str = "/usr/bin:/bin:/usr/sbin:/sbin";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LSPATH_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.lspath/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("LSPATH_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("lspath").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".lspath").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub baseline_path: String,

    /// Hard cap on one trace capture
    pub timeout_secs: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellFamily>,

    /// Bound of the event hand-off queue between the reader task and the consumer
    pub queue_capacity: usize,

    /// Treated like the built-in OS default directories when unifying
    pub extra_system_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseline_path: DEFAULT_BASELINE.to_string(),
            timeout_secs: 10,
            shell: None,
            queue_capacity: 256,
            extra_system_dirs: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        let config_path = resolve_config_path(explicit_path)?;
        Self::load_from(&config_path)
    }

    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(Error::Config("queue_capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
