mod cli;
mod error;

use std::sync::Arc;

use clap::Parser;
use secrecy::SecretString;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use weconnect_config::Config;
use weconnect_core::GarageAdapter;
use weconnect_garage::{DemoGarage, GarageSource, HttpGarage};
use weconnect_server::{AppState, create_router};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = apply_overrides(weconnect_config::load_config(cli.config.as_ref())?, &cli);
    config.validate()?;

    // Keep the file-appender guard alive for the process lifetime.
    let _log_guard = init_tracing(cli.verbose, &config)?;

    let state = AppState::starting(config.resolve_api_key());
    let router = create_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, demo = config.demo, "listening");

    // Bind first, connect upstream in the background: the health
    // endpoint answers immediately while the initial fetch runs.
    let garage = build_garage(&config)?;
    let bootstrap_state = state.clone();
    let cache_ttl = config.cache_ttl();
    tokio::spawn(async move {
        match GarageAdapter::connect(garage, cache_ttl).await {
            Ok(adapter) => {
                bootstrap_state.swap_adapter(Arc::new(adapter)).await;
                info!("vehicle adapter ready");
            }
            Err(e) => {
                error!(error = %e, "upstream bootstrap failed, staying in starting mode");
            }
        }
    });

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)?;

    state.adapter().await.shutdown().await;
    info!("shut down cleanly");
    Ok(())
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(host) = &cli.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.demo {
        config.demo = true;
    }
    if let Some(log_file) = &cli.log_file {
        config.log.file = Some(log_file.clone());
    }
    if let Some(api_key) = &cli.api_key {
        config.server.api_key = Some(api_key.clone());
    }
    config
}

fn build_garage(config: &Config) -> Result<Arc<dyn GarageSource>, CliError> {
    if config.demo {
        info!("serving the built-in demo fleet");
        return Ok(Arc::new(DemoGarage::new()));
    }

    // validate() guarantees the URL is present and parses.
    let url = config.bridge.url.as_deref().unwrap_or_default();
    let token: Option<SecretString> = config.resolve_bridge_token();
    Ok(Arc::new(HttpGarage::new(url, token.as_ref())?))
}

fn init_tracing(
    verbosity: u8,
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, CliError> {
    let directive = match verbosity {
        0 => config.log.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // stdout belongs to the protocol clients; all logs go to stderr.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    if let Some(path) = &config.log.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CliError::LogFile {
                path: path.display().to_string(),
                source,
            })?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Ok(Some(guard))
    } else {
        registry.init();
        Ok(None)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown signal handler");
    } else {
        info!("shutdown signal received");
    }
}
