//! Build the prompt sent to the language model

use crate::error::ConfigError;
use crate::i18n::{format_positional, placeholder_indexes, Localizer};

/// Translation key of the default user prompt template
pub const TEMPLATE_KEY: &str = "default_prompt_template";

/// Translation key of the system message
pub const SYSTEM_PROMPT_KEY: &str = "system_prompt";

/// Argument index the query is substituted at
const QUERY_ARG: usize = 1;

/// Template used when no translation provides one
pub const FALLBACK_TEMPLATE: &str = "I am using {0}. Give me a single shell command that does the following: {1}. \
Reply with the command only, without explanations. If the command can destroy data or harm \
the system, start the reply with \"WARNING: \".";

/// System message used when no translation provides one
pub const FALLBACK_SYSTEM_PROMPT: &str =
    "You are a command-line expert. You answer with exactly one shell command and nothing else.";

/// Display name for a platform identifier such as `std::env::consts::OS`
///
/// Unknown identifiers are returned unchanged.
pub fn os_display_name(platform_id: &str) -> &str {
    match platform_id {
        "macos" => "macOS",
        "windows" => "Windows",
        "linux" => "Linux",
        other => other,
    }
}

/// Formats prompts from a template and the host OS
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    localizer: &'a Localizer,
    template_override: Option<String>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(localizer: &'a Localizer, template_override: Option<String>) -> Self {
        Self {
            localizer,
            template_override,
        }
    }

    /// Template in effect: the override, else the localized default
    pub fn template(&self) -> &str {
        match &self.template_override {
            Some(template) => template.as_str(),
            None => self.localizer.lookup(TEMPLATE_KEY).unwrap_or(FALLBACK_TEMPLATE),
        }
    }

    /// Substitute the OS display name and the query into the template
    pub fn build(&self, query: &str, platform_id: &str) -> Result<String, ConfigError> {
        let template = self.template();
        if !placeholder_indexes(template).contains(&QUERY_ARG) {
            return Err(ConfigError::MalformedTemplate {
                template: template.to_string(),
            });
        }

        Ok(format_positional(
            template,
            &[&os_display_name(platform_id), &query],
        ))
    }

    /// System message sent ahead of the prompt
    pub fn system_prompt(&self) -> &str {
        self.localizer
            .lookup(SYSTEM_PROMPT_KEY)
            .unwrap_or(FALLBACK_SYSTEM_PROMPT)
    }
}
