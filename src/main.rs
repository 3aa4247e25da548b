use cli_helper::cli::args::Args;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CLI_HELPER_LOG";

fn main() {
    let args = Args::parse_args();

    // Logs go to stderr so stdout carries only the command
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    std::process::exit(cli_helper::run(&args));
}
