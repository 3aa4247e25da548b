use clap::Parser;
use std::path::PathBuf;

/// cli-helper - turn a request into a shell command
///
/// Asks a language model for a single shell command matching the request,
/// prints it and copies it to the clipboard. The command is never executed.
#[derive(Parser, Debug)]
#[command(name = "cli-helper")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    OPENAI_API_KEY    API key (required)\n    \
    OPENAI_API_BASE   OpenAI-compatible API base URL\n    \
    OPENAI_MODEL      Default model name\n    \
    PROMPT_TEMPLATE   Prompt template, {0} = OS name, {1} = request\n    \
    CLI_HELPER_LOG    Log filter (e.g. debug)")]
pub struct Args {
    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Use specific config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore the config file
    #[arg(long)]
    pub no_config: bool,

    /// Override the model name
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Copy the command to the clipboard
    #[arg(long, overrides_with = "no_copy")]
    pub copy: bool,

    /// Do not copy the command to the clipboard
    #[arg(long, overrides_with = "copy")]
    pub no_copy: bool,

    /// What the command should do
    #[arg(value_name = "REQUEST")]
    pub query: Vec<String>,
}

impl Args {
    /// Parse arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Try to parse from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Positional arguments joined with single spaces, `None` if blank
    pub fn query(&self) -> Option<String> {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            None
        } else {
            Some(query)
        }
    }

    /// Whether to copy, given the configured default
    pub fn copy_enabled(&self, default: bool) -> bool {
        if self.no_copy {
            false
        } else if self.copy {
            true
        } else {
            default
        }
    }
}
