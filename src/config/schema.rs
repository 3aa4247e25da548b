use serde::Deserialize;

/// Default model when neither the environment nor the config file names one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Config file structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub prompt: PromptConfig,
    pub clipboard: ClipboardConfig,
    pub locales: LocalesConfig,
}

/// Language-model settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name sent with each request
    pub name: Option<String>,
    /// API base URL (OpenAI-compatible)
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Prompt settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Template with `{0}` for the OS name and `{1}` for the request
    pub template: Option<String>,
}

/// Clipboard settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy the command unless `--no-copy` is given
    pub copy: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { copy: true }
    }
}

/// Translation file settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Directory searched before the standard locations (`~` and `$VAR` expanded)
    pub dir: Option<String>,
}
