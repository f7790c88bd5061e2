//! AeroWeather CLI
//!
//! Polls METAR and TAF reports for the configured stations and renders one
//! sensor per station and report type.

#![allow(clippy::print_stdout)]

mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::{ReportSourcePort, SensorService, UpdateService};
use clap::{Parser, Subcommand};
use domain::StationSet;
use infrastructure::{
    AppConfig, ReportSourceAdapter, UpdateCoordinator, init_telemetry, spawn_polling_task,
};
use tokio::sync::watch;
use tracing::info;

/// AeroWeather CLI
#[derive(Parser)]
#[command(name = "aeroweather")]
#[command(author, version, about = "METAR/TAF poller for aviationweather.gov", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Station identifier to poll, replaces the configured list (repeatable)
    #[arg(short, long = "station", global = true)]
    stations: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll on the configured interval until Ctrl-C
    Run,

    /// Run a single update cycle and print the result
    Once {
        /// Print the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the sensors that would be registered
    Sensors,
}

/// Determine log filter from verbosity count
///
/// Without `-v` the configured filter (default `info,reqwest=warn`) applies.
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_coordinator(
    config: &AppConfig,
    stations: StationSet,
) -> anyhow::Result<Arc<UpdateCoordinator>> {
    let source: Arc<dyn ReportSourcePort> = Arc::new(
        ReportSourceAdapter::with_config(config.aviation_weather.clone())
            .context("failed to create aviation weather client")?,
    );
    Ok(Arc::new(UpdateCoordinator::new(
        UpdateService::new(source),
        stations,
    )))
}

/// Poll until Ctrl-C, printing every sensor after each successful refresh
async fn run(
    config: &AppConfig,
    coordinator: Arc<UpdateCoordinator>,
    sensors: &SensorService,
) -> anyhow::Result<()> {
    let (stop, shutdown) = watch::channel(false);
    let mut updates = coordinator.subscribe();
    let handle = spawn_polling_task(Arc::clone(&coordinator), config.scan_interval(), shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = coordinator.snapshot();
                println!("{}\n", render::state_table(&sensors.states(snapshot.as_deref())));
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!("Ctrl-C received, shutting down");
                break;
            },
        }
    }

    // The task also stops when the sender is dropped
    stop.send(true).ok();
    handle.await.context("polling task panicked")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if !cli.stations.is_empty() {
        config.stations = cli.stations;
    }
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }

    init_telemetry(&config.telemetry)?;

    let stations = config.station_set()?;
    let sensors = SensorService::new(&config.instance_id, &stations);

    match cli.command {
        Commands::Sensors => {
            println!("{}", render::sensor_list(sensors.sensors()));
        },

        Commands::Once { json } => {
            let coordinator = build_coordinator(&config, stations)?;
            let snapshot = coordinator.refresh().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&*snapshot)?);
            } else {
                println!("{}", render::state_table(&sensors.states(Some(&*snapshot))));
            }
        },

        Commands::Run => {
            let coordinator = build_coordinator(&config, stations)?;
            run(&config, coordinator, &sensors).await?;
        },
    }

    Ok(())
}
