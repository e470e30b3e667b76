//! orgdesk command-line interface.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use orgdesk_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use orgdesk_cli::commands::run_command;
use orgdesk_cli::config::Settings;
use orgdesk_cli::logging::{LogConfig, LogFormat, init_logging};
use orgdesk_cli::render::{Styling, TerminalRenderer};
use orgdesk_core::{App, CoreError};
use orgdesk_store::{FileStorage, PersistenceError};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            if let Some(hint) = persistence_hint(&error) {
                eprintln!("hint: {hint}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let settings = Settings::load(cli.config.as_deref());
    let path = settings.store_path(cli.store.as_deref());
    let storage = FileStorage::open(&path)
        .with_context(|| format!("failed to open store {}", path.display()))?;
    let mut app = App::start(storage).context("failed to start")?;

    let mut renderer = TerminalRenderer::new()
        .with_ids(settings.display.show_ids)
        .with_json(cli.json)
        .with_styling(match cli.color.color {
            ColorChoice::Always => Styling::Always,
            ColorChoice::Never => Styling::Never,
            ColorChoice::Auto => Styling::Auto,
        });
    let outcome = run_command(&mut app, &cli.command, &mut renderer)?;

    for notice in renderer.notices() {
        eprintln!("{notice}");
    }
    print!("{}", renderer.output());
    Ok(outcome.exit_code())
}

/// Remediation hint for a storage failure anywhere in the error chain.
fn persistence_hint(error: &anyhow::Error) -> Option<String> {
    error
        .chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<PersistenceError>()
                .or_else(|| match cause.downcast_ref::<CoreError>() {
                    Some(CoreError::Persistence(inner)) => Some(inner),
                    _ => None,
                })
        })
        .and_then(PersistenceError::suggestion)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
