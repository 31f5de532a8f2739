/// REPL configuration
///
/// Loaded from a JSON file (`~/.multivalue/config.json` by default), with
/// missing fields falling back to defaults and an environment override for
/// the prompt.

use crate::error::{MultiValueError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable that replaces the configured prompt
pub const PROMPT_ENV_VAR: &str = "MULTIVALUE_PROMPT";

const DEFAULT_PROMPT: &str = "> ";

/// Configuration for the interactive session
///
/// # Example
///
/// ```rust
/// use multivalue_lib::ReplConfig;
///
/// let config = ReplConfig::default()
///     .with_prompt("mv> ")
///     .with_show_prompt(true);
/// assert_eq!(config.prompt, "mv> ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Written before each input line (default: "> ")
    pub prompt: String,
    /// Whether the prompt is written at all
    pub show_prompt: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            show_prompt: true,
        }
    }
}

impl ReplConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_show_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            MultiValueError::Config("Could not determine home directory".to_string())
        })?;

        Ok(home.join(".multivalue").join("config.json"))
    }

    /// Read a config file
    ///
    /// # Returns
    /// * `Ok(ReplConfig)` - Parsed config, unset fields at their defaults
    /// * `Err(MultiValueError)` - File unreadable or not valid JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Resolve the config for this run
    ///
    /// An explicit path must exist. Without one, the default file is used if
    /// present, otherwise defaults apply. The prompt env var wins over both.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                Ok(_) => Self::default(),
                Err(e) => {
                    warn!(error = %e, "using default config");
                    Self::default()
                }
            },
        };

        Ok(config.apply_env(std::env::var(PROMPT_ENV_VAR).ok()))
    }

    fn apply_env(self, prompt: Option<String>) -> Self {
        match prompt {
            Some(prompt) => self.with_prompt(prompt),
            None => self,
        }
    }
}
