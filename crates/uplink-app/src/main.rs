mod cli;
mod console;
mod init;
mod repl;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use uplink_config::UplinkConfig;

const DEFAULT_LOG_DIRECTIVE: &str = "uplink=info";

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables that are already set win over the file.
fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("uplink").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key, value)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Pick the filter directive: CLI flag, then config, then the default.
fn select_directive<'a>(flag: Option<&'a str>, config: Option<&UplinkConfig>) -> &'a str {
    flag.or_else(|| config.map(|c| c.logging.level.directive()))
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
}

fn parse_directive(requested: &str) -> Option<Directive> {
    match requested.parse() {
        Ok(directive) => Some(directive),
        Err(e) => {
            eprintln!("Invalid log directive {requested:?} ({e}); using {DEFAULT_LOG_DIRECTIVE}");
            DEFAULT_LOG_DIRECTIVE.parse().ok()
        }
    }
}

fn main() -> ExitCode {
    load_dotenv();

    let args = cli::parse();

    // Loaded before logging so the config can pick the log level.
    let loaded = uplink_config::load_config(args.config.as_deref().map(Path::new));

    let mut filter = EnvFilter::from_default_env();
    if let Some(directive) =
        parse_directive(select_directive(args.log_level.as_deref(), loaded.as_ref().ok()))
    {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    tracing::info!("Uplink v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        UplinkConfig::default()
    });

    let image_dir = args
        .image_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.image.resolved_output_dir());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(repl::run(config, image_dir)) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Console error: {e}");
            ExitCode::FAILURE
        }
    }
}
