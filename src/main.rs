use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ecrime::cli::{write_help, Cli, Commands};
use ecrime::commands;
use ecrime::services::config::Config;
use ecrime::services::gateway::ApiClient;
use ecrime::services::output::report_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    colored::control::set_override(std::io::stderr().is_terminal());

    let Some(command) = &cli.command else {
        return match write_help(&mut std::io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report_error(&e);
                ExitCode::FAILURE
            }
        };
    };

    let config = match Config::load(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e.into());
            return ExitCode::FAILURE;
        }
    };

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Commands, config: &Config) -> anyhow::Result<()> {
    tracing::debug!(api_url = %config.api_url, "resolved configuration");
    let api = ApiClient::new(&config.api_url, &config.api_key)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(command, &api, &mut out, chrono::Utc::now().date_naive())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ecrime=debug" } else { "ecrime=error" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
