use clap::Parser;
use climate_api::{server, Cli, ClimateError, ClimateService, ClimateStore, Settings};
use env_logger::Env;
use log::{error, info, warn};
use std::error::Error;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClimateError> {
    let settings = Settings::load(&cli)?;
    info!(
        "Measurements: {}, stations: {}",
        settings.data.measurements.display(),
        settings.data.stations.display()
    );

    let data = settings.data.clone();
    let store = tokio::task::spawn_blocking(move || {
        ClimateStore::load()
            .measurements(&data.measurements)
            .stations(&data.stations)
            .call()
    })
    .await??;

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ClimateError::Bind(address.clone(), e))?;

    server::serve(listener, ClimateService::new(store), shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, finishing in-flight requests"),
        Err(e) => {
            warn!("Unable to listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
