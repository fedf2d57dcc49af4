//! Startup configuration from environment variables.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `GEMINI_API_KEY` | enables the external judge |
//! | `MOCK_GEMINI` | `1` forces the deterministic judge |
//! | `GEMINI_MODEL` | model name |
//! | `GEMINI_BASE_URL` | API root |
//! | `GEMINI_TIMEOUT_SECS` | request timeout |
//! | `JUDGE_PROMPT_PATH` | system instruction file |

use crate::judge::{
    DeterministicBackend, ExternalBackend, GeminiClient, Judge, JudgeBackend, JudgeError,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PROMPT_PATH: &str = "prompts/judge_prompt.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read system prompt {path}: {source}")]
    PromptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error(transparent)]
    Backend(#[from] JudgeError),
}

/// Which judge the session runs with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendMode {
    External,
    Deterministic,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JudgeConfig {
    pub api_key: Option<String>,
    pub force_mock: bool,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub prompt_path: PathBuf,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            force_mock: false,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            prompt_path: PathBuf::from(DEFAULT_PROMPT_PATH),
        }
    }
}

impl JudgeConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "GEMINI_TIMEOUT_SECS",
                    value: value.clone(),
                }
            })?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            force_mock: lookup("MOCK_GEMINI").is_some_and(|v| v.trim() == "1"),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout,
            prompt_path: lookup("JUDGE_PROMPT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.prompt_path),
        })
    }

    pub fn mode(&self) -> BackendMode {
        if self.force_mock || self.api_key.is_none() {
            BackendMode::Deterministic
        } else {
            BackendMode::External
        }
    }

    /// Load the system instruction text, once, at startup
    pub fn load_system_prompt(&self) -> Result<String, ConfigError> {
        std::fs::read_to_string(&self.prompt_path).map_err(|source| ConfigError::PromptUnreadable {
            path: self.prompt_path.clone(),
            source,
        })
    }

    /// Select the judge backend. Done once; the session never re-checks.
    pub fn build_judge(&self, system_prompt: impl Into<Arc<str>>) -> Result<Judge, ConfigError> {
        let backend: Arc<dyn JudgeBackend> = match (self.mode(), &self.api_key) {
            (BackendMode::External, Some(api_key)) => {
                info!(model = %self.model, "Using external judge");
                let client = GeminiClient::with_options(
                    api_key.clone(),
                    self.base_url.clone(),
                    self.model.clone(),
                    self.timeout,
                )?;
                Arc::new(ExternalBackend::new(client))
            }
            _ => {
                if !self.force_mock {
                    warn!("GEMINI_API_KEY not set, using the deterministic judge");
                } else {
                    info!("MOCK_GEMINI=1, using the deterministic judge");
                }
                Arc::new(DeterministicBackend::new())
            }
        };

        Ok(Judge::new(backend, system_prompt))
    }
}
