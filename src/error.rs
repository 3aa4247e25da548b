//! Error types for each stage of a run
//!
//! Configuration and request errors abort the run. Localization and
//! clipboard errors are always recoverable.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving settings or the prompt template
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `OPENAI_API_KEY` is unset or empty
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// Prompt template never references the query argument
    #[error("prompt template has no placeholder for the query: {template:?}")]
    MalformedTemplate { template: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors raised while loading translation files
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// None of the candidate directories exists
    #[error("locales directory not found in any of: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// A `.json` file is not a flat string-to-string object
    #[error("invalid translation file {file}: {source}")]
    InvalidFormat {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the language-model request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse model response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("model returned no choices")]
    EmptyResponse,
}

/// Errors raised while delivering text to the clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not supported on {platform}")]
    UnsupportedPlatform { platform: String },

    /// No helper from the candidate list is on `PATH`
    #[error("no clipboard tool found (tried: {})", .candidates.join(", "))]
    ToolNotFound { candidates: Vec<String> },

    #[error("{tool} failed: {reason}")]
    ExecutionFailed { tool: String, reason: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
