//! Runtime settings, layered from defaults, an optional config file, `CLIMATE__*` environment
//! variables and command line flags (highest precedence last).

use crate::error::ClimateError;
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MEASUREMENTS: &str = "Resources/hawaii_measurements.csv";
pub const DEFAULT_STATIONS: &str = "Resources/hawaii_stations.csv";
const ENV_PREFIX: &str = "CLIMATE";

/// Command line flags of the `climate_api` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "climate_api", version, about = "Serve climate observations over HTTP")]
pub struct Cli {
    /// Config file (TOML, YAML or JSON); ignored if it does not exist
    #[arg(short, long, default_value = "climate.toml")]
    pub config: PathBuf,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Measurement table (.csv or .parquet)
    #[arg(long)]
    pub measurements: Option<PathBuf>,

    /// Station table (.csv or .parquet)
    #[arg(long)]
    pub stations: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataSettings {
    pub measurements: PathBuf,
    pub stations: PathBuf,
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self, ClimateError> {
        Self::load_with_env(cli, environment())
    }

    fn load_with_env(cli: &Cli, env: Environment) -> Result<Self, ClimateError> {
        let settings = Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("data.measurements", DEFAULT_MEASUREMENTS)?
            .set_default("data.stations", DEFAULT_STATIONS)?
            .add_source(File::from(cli.config.as_path()).required(false))
            .add_source(env)
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("data.measurements", path_value(&cli.measurements))?
            .set_override_option("data.stations", path_value(&cli.stations))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
