//! A read-only HTTP API over a snapshot of weather-station records.
//!
//! The dataset consists of two tables, daily [`Measurement`]s (precipitation and temperature per
//! station and date) and [`Station`] metadata. It is loaded once into a [`ClimateStore`] and
//! queried through [`ClimateService`]; [`server::router`] exposes the queries as JSON endpoints:
//!
//! | Route                     | Query                                           |
//! |---------------------------|-------------------------------------------------|
//! | `/`                       | [`ClimateService::list_routes`]                 |
//! | `/api/v1.0/precipitation` | [`ClimateService::precipitation`]               |
//! | `/api/v1.0/stations`      | [`ClimateService::station_ids`]                 |
//! | `/api/v1.0/tobs`          | [`ClimateService::most_active_temperatures`]    |
//! | `/api/v1.0/<start>`       | [`ClimateService::temperature_since`]           |
//! | `/api/v1.0/<start>/<end>` | [`ClimateService::temperature_between`]         |

mod climate;
mod error;
mod filtering;
pub mod server;
mod settings;
mod store;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use climate::*;
pub use error::ClimateError;
pub use filtering::ClimateFrameFilterExt;
pub use settings::{Cli, DataSettings, ServerSettings, Settings};

pub use store::climate_store::ClimateStore;
pub use store::error::StoreError;

pub use types::measurement::Measurement;
pub use types::observation::{PrecipitationByDate, TemperatureObservation, TemperatureSummary};
pub use types::station::Station;
pub use types::table::{ColumnSpec, Table, TableSchema};
