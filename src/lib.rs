pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod i18n;
pub mod llm;
pub mod prompt;
pub mod sanitize;
pub mod utils;

use std::io::{self, Write};

use cli::args::Args;
use cli::commands::{self, exit_codes, Pipeline};
use clipboard::ClipboardDispatcher;
use config::{env_file_search_paths, load_env_file, load_global_config, Config, Settings};
use i18n::{default_search_paths, detect_system_locale, Localizer};
use llm::OpenAiClient;

/// Run the CLI with parsed arguments and return the process exit code
pub fn run(args: &Args) -> i32 {
    match load_env_file(&env_file_search_paths()) {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) => tracing::warn!("{:#}", e),
    }

    let config = if args.no_config {
        Ok(Config::default())
    } else {
        load_global_config(args.config.as_deref())
    };

    let settings = Settings::from_env(config.as_ref().unwrap_or(&Config::default()))
        .with_model_override(args.model.as_deref());

    let search_paths = default_search_paths(settings.locales_dir.as_deref());
    let localizer = Localizer::load_or_degraded(detect_system_locale(), &search_paths);
    tracing::debug!(locale = localizer.locale(), "localizer ready");

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    if let Err(e) = &config {
        report_config_error(&localizer, e, &mut err);
        return exit_codes::FAILURE;
    }

    let Some(query) = args.query() else {
        return commands::usage_error(&localizer, &mut err);
    };

    let api_key = match settings.api_key() {
        Ok(key) => key,
        Err(e) => {
            report_config_error(&localizer, &e, &mut err);
            return exit_codes::FAILURE;
        }
    };

    let client = match OpenAiClient::from_settings(&settings, api_key) {
        Ok(client) => client,
        Err(e) => {
            let message = commands::PipelineError::from(e).describe(&localizer);
            let _ = writeln!(err, "{}", message);
            return exit_codes::FAILURE;
        }
    };
    tracing::debug!(model = client.model(), "model client ready");

    let clipboard = ClipboardDispatcher::system();
    let pipeline = Pipeline {
        localizer: &localizer,
        model: &client,
        clipboard: &clipboard,
        template_override: settings.prompt_template.clone(),
        platform: std::env::consts::OS,
    };

    pipeline.run(
        &query,
        args.copy_enabled(settings.copy_by_default),
        &mut out,
        &mut err,
    )
}

fn report_config_error(localizer: &Localizer, error: &error::ConfigError, err: &mut dyn Write) {
    let _ = writeln!(err, "{}", commands::describe_config_error(error, localizer));
}
