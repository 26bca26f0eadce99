//! The in-memory data source behind the query service.

use crate::store::data_loader::{conform, read_table};
use crate::store::error::StoreError;
use crate::types::measurement::Measurement;
use crate::types::station::Station;
use crate::types::table::{DATE, STATION};
use crate::utils::parse_date;
use bon::bon;
use log::{info, warn};
use polars::prelude::{DataFrame, IntoLazy, LazyFrame};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Read-only snapshot of the `measurement` and `station` tables.
///
/// The store is built once, validated, and then only handed out as `LazyFrame`s, so any number
/// of requests can query it concurrently without locking. Build it from files with
/// [`ClimateStore::load`], or from in-memory data with [`ClimateStore::from_frames`] /
/// [`ClimateStore::from_records`].
///
/// Validation guarantees that:
/// - both tables have the declared columns and types ([`crate::TableSchema`]),
/// - station identifiers are unique,
/// - every measurement date parses as `YYYY-MM-DD`.
///
/// Measurements referencing stations missing from the station table are accepted with a
/// warning.
///
/// # Examples
///
/// ```
/// use climate_api::{ClimateStore, Measurement, Station};
///
/// let store = ClimateStore::from_records(
///     &[Measurement::new("USC00519281", "2017-08-23", Some(0.45), 79.0)],
///     &[Station::new("USC00519281")],
/// )?;
/// assert_eq!(store.measurement_count(), 1);
/// # Ok::<(), climate_api::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClimateStore {
    measurements: DataFrame,
    stations: DataFrame,
}

#[bon]
impl ClimateStore {
    /// Loads both tables from disk (`.csv` with a header row, or `.parquet`).
    ///
    /// ```no_run
    /// use climate_api::ClimateStore;
    /// use std::path::Path;
    ///
    /// let store = ClimateStore::load()
    ///     .measurements(Path::new("Resources/hawaii_measurements.csv"))
    ///     .stations(Path::new("Resources/hawaii_stations.csv"))
    ///     .call()?;
    /// println!("{} stations loaded", store.station_count());
    /// # Ok::<(), climate_api::StoreError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Any [`StoreError`]: unreadable files, unsupported extensions, schema problems, duplicate
    /// station identifiers or malformed dates.
    #[builder]
    pub fn load(measurements: &Path, stations: &Path) -> Result<Self, StoreError> {
        let measurements = read_table::<Measurement>(measurements)?;
        let stations = read_table::<Station>(stations)?;
        Self::validated(measurements, stations)
    }
}

impl ClimateStore {
    /// Builds a store from already loaded frames, applying the same checks as [`ClimateStore::load`].
    pub fn from_frames(measurements: DataFrame, stations: DataFrame) -> Result<Self, StoreError> {
        let measurements = conform::<Measurement>(measurements.lazy())?;
        let stations = conform::<Station>(stations.lazy())?;
        Self::validated(measurements, stations)
    }

    pub fn from_records(
        measurements: &[Measurement],
        stations: &[Station],
    ) -> Result<Self, StoreError> {
        Self::from_frames(
            Measurement::to_frame(measurements)?,
            Station::to_frame(stations)?,
        )
    }

    /// Lazy view over the `measurement` table, in stored row order.
    pub fn measurements(&self) -> LazyFrame {
        self.measurements.clone().lazy()
    }

    /// Lazy view over the `station` table, in stored row order.
    pub fn stations(&self) -> LazyFrame {
        self.stations.clone().lazy()
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.height()
    }

    pub fn station_count(&self) -> usize {
        self.stations.height()
    }

    fn validated(measurements: DataFrame, stations: DataFrame) -> Result<Self, StoreError> {
        let station_ids = stations.column(STATION)?.str()?;
        let mut known = HashSet::with_capacity(station_ids.len());
        for id in station_ids.into_iter().flatten() {
            if !known.insert(id) {
                return Err(StoreError::DuplicateStation(id.to_string()));
            }
        }

        let dates = measurements.column(DATE)?.str()?;
        let mut first: Option<&str> = None;
        let mut last: Option<&str> = None;
        for date in dates.into_iter().flatten() {
            if parse_date(date).is_none() {
                return Err(StoreError::InvalidDate(date.to_string()));
            }
            first = Some(first.map_or(date, |current| current.min(date)));
            last = Some(last.map_or(date, |current| current.max(date)));
        }

        let unknown: BTreeSet<&str> = measurements
            .column(STATION)?
            .str()?
            .into_iter()
            .flatten()
            .filter(|id| !known.contains(id))
            .collect();
        if !unknown.is_empty() {
            warn!(
                "{} station(s) referenced by measurements are missing from station data: {:?}",
                unknown.len(),
                unknown
            );
        }

        match (first, last) {
            (Some(first), Some(last)) => info!(
                "Climate data ready: {} measurements from {} to {}, {} stations",
                measurements.height(),
                first,
                last,
                stations.height()
            ),
            _ => warn!(
                "Climate data ready without measurements ({} stations)",
                stations.height()
            ),
        }

        Ok(Self {
            measurements,
            stations,
        })
    }
}
