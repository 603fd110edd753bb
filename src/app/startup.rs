//! Composition root: configuration, logging, hub and the refresh loop

use super::cli::{Args, OutputFormat};
use super::config::HubConfig;
use super::report::StatusReport;
use crate::analysis::api::{install_shared_hub, refresh_all, StateHub};
use crate::core::error_handling::{describe, log_fatal_with_context};
use crate::core::logging::{init_logging, reconfigure_logging};
use crate::core::shutdown::ShutdownCoordinator;
use crate::model::Preferences;
use crate::notifications::api::listener_fn;
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

/// Run the application; returns the process exit code
pub async fn startup() -> i32 {
    let args = Args::parse();
    let color = args.use_color(std::io::stdout().is_terminal());

    // Logging is configured from the file, so config errors go to stderr
    let config = match HubConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", describe(&e, "Loading configuration"));
            return 1;
        }
    };

    let log_level = config.log_level(args.log_level.as_deref());
    let log_format = args.log_format.or(config.logging.format).unwrap_or_default();
    let log_file = args.log_file.clone().or_else(|| config.logging.file.clone());
    if let Err(e) = init_logging(
        Some(&log_level),
        log_format,
        log_file.as_deref().and_then(|p| p.to_str()),
        color,
    ) {
        eprintln!("Error: could not start logging: {}", e);
        return 1;
    }

    log::info!("repostate {} starting", crate::version_string());

    let hub = install_shared_hub(StateHub::new(config.build_registry())).unwrap_or_else(|existing| existing);
    hub.add_listener(listener_fn("change-log", || {
        log::debug!("Cached analysis results changed");
        Ok(())
    }));

    let interval = if args.once {
        None
    } else {
        config.refresh_interval(args.interval)
    };

    let shutdown = ShutdownCoordinator::new();
    shutdown.install_signal_handlers();
    #[cfg(unix)]
    install_reload_handler(args.config_file.clone(), args.log_level.clone());

    match run(hub, &config.projects, interval, &shutdown, args.output, color).await {
        Ok(()) => 0,
        Err(e) => {
            log_fatal_with_context(&e, "Writing status report");
            1
        }
    }
}

/// Apply the log level the configuration file names now
///
/// Returns the level applied.
pub async fn reload_log_level(
    config_file: Option<&Path>,
    cli_level: Option<&str>,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let level = HubConfig::load(config_file).await?.log_level(cli_level);
    reconfigure_logging(&level).map_err(|e| e.to_string())?;
    Ok(level)
}

/// Re-read the log level from the configuration file on SIGHUP
#[cfg(unix)]
fn install_reload_handler(config_file: Option<std::path::PathBuf>, cli_level: Option<String>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut hangup) = signal(SignalKind::hangup()) else {
            log::warn!("Could not listen for SIGHUP; log level reload disabled");
            return;
        };
        while hangup.recv().await.is_some() {
            match reload_log_level(config_file.as_deref(), cli_level.as_deref()).await {
                Ok(level) => log::info!("Log level reloaded: {}", level),
                Err(e) => log::warn!("Could not reload log level: {}", e),
            }
        }
    });
}

/// Refresh and report until the rounds run out or shutdown is requested
async fn run(
    hub: Arc<StateHub>,
    prefs: &Preferences,
    interval: Option<std::time::Duration>,
    shutdown: &ShutdownCoordinator,
    output: OutputFormat,
    color: bool,
) -> Result<(), ReportError> {
    loop {
        let mut shutdown_rx = shutdown.subscribe();

        let summary = refresh_all(Arc::clone(&hub), prefs).await;
        print_report(&StatusReport::collect(&hub, prefs, summary), output, color)?;

        let Some(interval) = interval else {
            return Ok(());
        };
        if shutdown.is_shutdown_requested() {
            return Ok(());
        }

        log::debug!("Next refresh round in {}s", interval.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown_rx.recv() => return Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl crate::core::error_handling::ContextualError for ReportError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

fn print_report(report: &StatusReport, output: OutputFormat, color: bool) -> Result<(), ReportError> {
    match output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            println!("{}", report.heading(color));
            let table = report.to_table(color);
            if color {
                table
                    .print_tty(true)
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
            } else {
                table
                    .print(&mut std::io::stdout())
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
            }
            println!();
        }
    }
    Ok(())
}
