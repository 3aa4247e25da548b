//! Effective settings: environment over config file over defaults

use crate::error::ConfigError;
use crate::utils::paths::expand_path;
use std::path::PathBuf;

use super::schema::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_API_BASE";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const PROMPT_TEMPLATE_VAR: &str = "PROMPT_TEMPLATE";

/// Settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Template override; `None` means the localized default
    pub prompt_template: Option<String>,
    pub copy_by_default: bool,
    pub locales_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from a config file and a variable lookup
    ///
    /// Empty variables count as unset.
    pub fn resolve<F>(config: &Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            api_key: var(API_KEY_VAR),
            base_url: var(BASE_URL_VAR)
                .or_else(|| config.model.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: var(MODEL_VAR)
                .or_else(|| config.model.name.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.model.temperature,
            prompt_template: var(PROMPT_TEMPLATE_VAR).or_else(|| config.prompt.template.clone()),
            copy_by_default: config.clipboard.copy,
            locales_dir: config.locales.dir.as_deref().map(expand_path),
        }
    }

    /// Resolve settings from a config file and the process environment
    pub fn from_env(config: &Config) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Use `model` instead of the resolved model name
    pub fn with_model_override(mut self, model: Option<&str>) -> Self {
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            self.model = model.to_string();
        }
        self
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
