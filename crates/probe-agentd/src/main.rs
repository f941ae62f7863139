mod cli;

use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use probe_api::{HttpApi, ProbeHandler, ProbeService};
use probe_core::{ConfigSources, ScriptStore};
use probe_exec::{ExecConfig, ScriptRunner};
use probe_observe::{LoggerConfig, logger_init};
use probe_prometheus::ExporterMetrics;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let sources = ConfigSources::new(cli.config_files.iter().cloned());

    if cli.config_print {
        let canonical = sources.merge().context("merging configuration")?;
        print!("{canonical}");
        return Ok(());
    }

    // 1) Logger
    let cfg = LoggerConfig {
        format: cli.log_format,
        level: cli.log_level.clone(),
        ..Default::default()
    };
    logger_init(&cfg)?;
    info!("logger initialized");

    // 2) Configuration
    let snapshot = sources.load().context("loading configuration")?;
    info!(
        scripts = snapshot.len(),
        sources = ?sources.paths(),
        "configuration loaded"
    );

    // 3) Runner + service
    let exec = ExecConfig::default().with_default_timeout(cli.default_timeout());
    info!(default_timeout = ?exec.default_timeout, "script runner configured");

    let service = Arc::new(ProbeService::new(
        ScriptStore::with_snapshot(snapshot),
        ScriptRunner::new(exec),
        sources,
        ExporterMetrics::new()?,
    ));

    // 4) Signals
    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));
    tokio::spawn(reload_on_hangup(Arc::clone(&service), shutdown.clone()));

    // 5) Serve
    let listener = TcpListener::bind(&cli.listen_address)
        .await
        .with_context(|| format!("binding {}", cli.listen_address))?;
    info!(address = %cli.listen_address, "listening");

    let token = shutdown.clone();
    let server = probe_api::axum::serve(listener, HttpApi::new(service).router())
        .with_graceful_shutdown(async move { token.cancelled().await })
        .into_future();

    // Scripts without a deadline can keep a probe request open forever.
    tokio::select! {
        served = server => served.context("http server")?,
        _ = grace_expired(&shutdown, cli.shutdown_grace()) => {
            warn!(grace = ?cli.shutdown_grace(), "in-flight requests still running; exiting anyway");
        }
    }

    info!("shut down");
    Ok(())
}

/// Resolves `grace` after shutdown was requested.
async fn grace_expired(shutdown: &CancellationToken, grace: Duration) {
    shutdown.cancelled().await;
    tokio::time::sleep(grace).await;
}

async fn shutdown_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM; only Ctrl+C will stop the agent");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutting down...");
    shutdown.cancel();
}

#[cfg(unix)]
async fn reload_on_hangup(service: Arc<ProbeService>, shutdown: CancellationToken) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            error!(error = %e, "cannot listen for SIGHUP; reload only via the HTTP API");
            return;
        }
    };

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return,
            received = hangup.recv() => {
                if received.is_none() {
                    return;
                }
                info!("SIGHUP received, reloading configuration");
                if let Err(e) = service.reload().await {
                    error!(error = %e, "reload failed");
                }
            }
        }
    }
}

#[cfg(not(unix))]
async fn reload_on_hangup(_service: Arc<ProbeService>, _shutdown: CancellationToken) {}
