//! The request pipeline: prompt, model, sanitize, print, copy

use std::fmt::Display;
use std::io::Write;
use tracing::{debug, warn};

use crate::clipboard::{ClipboardDispatcher, Spawner, ToolResolver};
use crate::error::{ClipboardError, ConfigError, RequestError};
use crate::i18n::{format_positional, Localizer};
use crate::llm::CompletionModel;
use crate::prompt::PromptBuilder;
use crate::sanitize::{sanitize, SanitizedCommand};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Everything a run needs, built once at startup
pub struct Pipeline<'a, M: ?Sized, R, S> {
    pub localizer: &'a Localizer,
    pub model: &'a M,
    pub clipboard: &'a ClipboardDispatcher<R, S>,
    pub template_override: Option<String>,
    /// Platform identifier used for the prompt's OS name
    pub platform: &'a str,
}

impl<'a, M, R, S> Pipeline<'a, M, R, S>
where
    M: CompletionModel + ?Sized,
    R: ToolResolver,
    S: Spawner,
{
    /// Ask the model for a command and sanitize its reply
    pub fn generate(&self, query: &str) -> Result<SanitizedCommand, PipelineError> {
        let builder = PromptBuilder::new(self.localizer, self.template_override.clone());
        let prompt = builder.build(query, self.platform)?;
        debug!(%prompt, "built prompt");

        let raw = self.model.complete(builder.system_prompt(), &prompt)?;
        debug!(%raw, "model reply");

        Ok(sanitize(&raw))
    }

    /// Run the whole pipeline and return the exit code
    ///
    /// The command goes to `out`; warnings and notices go to `err`.
    pub fn run(
        &self,
        query: &str,
        copy: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        let result = match self.generate(query) {
            Ok(result) => result,
            Err(e) => {
                let _ = writeln!(err, "{}", e.describe(self.localizer));
                return exit_codes::FAILURE;
            }
        };

        let _ = writeln!(out, "{}", result.command);
        if result.dangerous {
            let _ = writeln!(err, "{}", self.localizer.get("danger_warning"));
        }

        if copy {
            match self.clipboard.copy(&result.command) {
                Ok(()) => {
                    let _ = writeln!(err, "{}", self.localizer.get("clipboard_success"));
                }
                Err(e) => {
                    warn!("clipboard delivery failed: {}", e);
                    let reason = describe_clipboard_error(&e, self.localizer);
                    let message = localized(self.localizer, "clipboard_error", &[&reason], || {
                        format!("Failed to copy to clipboard: {}", reason)
                    });
                    let _ = writeln!(err, "{}", message);
                }
            }
        }

        exit_codes::SUCCESS
    }
}

/// Failures that abort a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl PipelineError {
    /// Localized message for the user
    pub fn describe(&self, localizer: &Localizer) -> String {
        match self {
            PipelineError::Config(e) => describe_config_error(e, localizer),
            PipelineError::Request(e) => {
                localized(localizer, "request_error", &[e], || format!("Error: {}", e))
            }
        }
    }
}

/// Format a translated message, or use `fallback` when the key is missing
///
/// Error messages must stay readable when translations failed to load.
fn localized<F>(localizer: &Localizer, key: &str, args: &[&dyn Display], fallback: F) -> String
where
    F: FnOnce() -> String,
{
    match localizer.lookup(key) {
        Some(template) => format_positional(template, args),
        None => fallback(),
    }
}

/// Localized message for a configuration error
pub fn describe_config_error(error: &ConfigError, localizer: &Localizer) -> String {
    let english = || error.to_string();
    match error {
        ConfigError::MissingApiKey => localized(localizer, "api_key_error", &[], english),
        ConfigError::MalformedTemplate { template } => {
            localized(localizer, "template_error", &[template], english)
        }
        other => localized(localizer, "config_error", &[other], english),
    }
}

/// Localized message for a clipboard error
pub fn describe_clipboard_error(error: &ClipboardError, localizer: &Localizer) -> String {
    let english = || error.to_string();
    match error {
        ClipboardError::UnsupportedPlatform { platform } => {
            localized(localizer, "clipboard_not_supported", &[platform], english)
        }
        ClipboardError::ToolNotFound { .. } => {
            localized(localizer, "clipboard_tools_not_found", &[], english)
        }
        ClipboardError::ExecutionFailed { tool, reason } => {
            localized(localizer, "clipboard_execution_failed", &[tool, reason], english)
        }
    }
}

/// Print the usage error for an empty request
pub fn usage_error(localizer: &Localizer, err: &mut dyn Write) -> i32 {
    let _ = writeln!(err, "{}", localizer.get("usage_error"));
    let _ = writeln!(err, "{}", localizer.get("usage_help"));
    exit_codes::FAILURE
}
