//! unity-probe entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use unity_probe_cli::cli::Cli;

fn main() {
    // Load .env.local if it exists (for INPUT_IMAGE-TOKEN etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Stdout carries workflow commands, so logs go to stderr
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level(runner_debug).to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut sink = unity_probe_cli::make_sink(&cli, std::io::stdout());
    let code = unity_probe_cli::run(&cli, sink.as_mut());
    std::process::exit(code);
}
