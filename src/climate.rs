//! The query service: every endpoint of the API is one method on [`ClimateService`].
//!
//! Queries run synchronously against the shared [`ClimateStore`]. They are CPU-bound Polars
//! work, so async callers (the HTTP handlers) move them onto the blocking thread pool.

use crate::error::ClimateError;
use crate::filtering::ClimateFrameFilterExt;
use crate::store::climate_store::ClimateStore;
use crate::types::observation::{PrecipitationByDate, TemperatureObservation, TemperatureSummary};
use crate::types::table::{DATE, PRCP, STATION, TOBS};
use crate::utils::{lookback_start, round_to_tenth};
use log::debug;
use polars::prelude::{col, DataFrame, LazyFrame, SortMultipleOptions};
use std::sync::Arc;

/// Path prefix shared by every data endpoint.
pub const API_PREFIX: &str = "/api/v1.0";

const ROW_COUNT: &str = "row_count";
const TMIN: &str = "tmin";
const TAVG: &str = "tavg";
const TMAX: &str = "tmax";

/// Answers the climate queries exposed by the HTTP API.
///
/// The service is a cheap, cloneable handle around an `Arc<ClimateStore>`; clones share the
/// same immutable dataset. It holds no other state, so every call is independent.
///
/// "Last 12 months" queries are anchored on the latest date found in the measurement table,
/// never on the wall clock: with data ending 2017-08-23 they cover 2016-08-23 to 2017-08-23.
///
/// # Examples
///
/// ```
/// use climate_api::{ClimateService, ClimateStore, Measurement, Station};
///
/// let store = ClimateStore::from_records(
///     &[
///         Measurement::new("USC00519281", "2017-08-22", Some(0.0), 76.0),
///         Measurement::new("USC00519281", "2017-08-23", Some(0.45), 79.0),
///     ],
///     &[Station::new("USC00519281")],
/// )?;
/// let service = ClimateService::new(store);
///
/// let summary = service.temperature_since("2017-08-23")?;
/// assert_eq!(summary.max, Some(79.0));
///
/// let stations = service.station_ids()?;
/// assert_eq!(stations, vec!["USC00519281".to_string()]);
/// # Ok::<(), climate_api::ClimateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClimateService {
    store: Arc<ClimateStore>,
}

impl ClimateService {
    pub fn new(store: ClimateStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// The HTML welcome page listing the available routes.
    pub fn list_routes() -> String {
        format!(
            "Welcome to the Climate App API!<br/>\
             Available Routes:<br/>\
             {API_PREFIX}/precipitation<br/>\
             {API_PREFIX}/stations<br/>\
             {API_PREFIX}/tobs<br/>\
             {API_PREFIX}/&lt;start&gt;<br/>\
             {API_PREFIX}/&lt;start&gt;/&lt;end&gt;<br/>"
        )
    }

    /// The most recent measurement date, or `None` when there are no measurements.
    pub fn latest_date(&self) -> Result<Option<String>, ClimateError> {
        let df = self
            .store
            .measurements()
            .select([col(DATE).max()])
            .collect()?;
        first_str(&df, DATE)
    }

    /// The first date of the 12-month window: latest measurement date minus 365 days.
    ///
    /// # Errors
    ///
    /// [`ClimateError::InvalidAnchorDate`] if the latest stored date cannot be parsed. Stores
    /// built through [`ClimateStore`] validate their dates, so this only signals corrupted data.
    pub fn query_anchor(&self) -> Result<Option<String>, ClimateError> {
        let Some(latest) = self.latest_date()? else {
            return Ok(None);
        };
        let anchor =
            lookback_start(&latest).ok_or_else(|| ClimateError::InvalidAnchorDate(latest.clone()))?;
        debug!("Query window: {} to {}", anchor, latest);
        Ok(Some(anchor))
    }

    /// Precipitation for every date of the last 12 months of data.
    ///
    /// Rows are folded in stored order, so when several stations report on the same date the
    /// value of the last row wins. An empty measurement table yields an empty map.
    pub fn precipitation(&self) -> Result<PrecipitationByDate, ClimateError> {
        let Some(since) = self.query_anchor()? else {
            debug!("No measurements, precipitation is empty");
            return Ok(PrecipitationByDate::new());
        };

        let df = self
            .store
            .measurements()
            .filter_since(&since)
            .select([col(DATE), col(PRCP)])
            .collect()?;

        let dates = df.column(DATE)?.str()?;
        let amounts = df.column(PRCP)?.f64()?;
        let mut by_date = PrecipitationByDate::new();
        for (date, amount) in dates.into_iter().zip(amounts.into_iter()) {
            if let Some(date) = date {
                by_date.insert(date.to_string(), amount);
            }
        }
        Ok(by_date)
    }

    /// All station identifiers, in stored order.
    pub fn station_ids(&self) -> Result<Vec<String>, ClimateError> {
        let df = self.store.stations().select([col(STATION)]).collect()?;
        Ok(df
            .column(STATION)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect())
    }

    /// The station with the most measurement rows.
    ///
    /// Ties go to the lexicographically smallest station identifier. `None` when there are no
    /// measurements.
    pub fn most_active_station(&self) -> Result<Option<String>, ClimateError> {
        let df = self
            .store
            .measurements()
            .group_by([col(STATION)])
            .agg([col(DATE).count().alias(ROW_COUNT)])
            .sort_by_exprs(
                [col(ROW_COUNT), col(STATION)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(1)
            .collect()?;
        let station = first_str(&df, STATION)?;
        debug!("Most active station: {:?}", station);
        Ok(station)
    }

    /// Temperature observations of the most active station over the last 12 months of data.
    ///
    /// One entry per measurement row in stored order; rows sharing a date stay separate.
    pub fn most_active_temperatures(&self) -> Result<Vec<TemperatureObservation>, ClimateError> {
        let Some(station) = self.most_active_station()? else {
            return Ok(Vec::new());
        };
        let Some(since) = self.query_anchor()? else {
            return Ok(Vec::new());
        };

        let df = self
            .store
            .measurements()
            .filter_station(&station)
            .filter_since(&since)
            .select([col(DATE), col(TOBS)])
            .collect()?;

        let dates = df.column(DATE)?.str()?;
        let temperatures = df.column(TOBS)?.f64()?;
        Ok(dates
            .into_iter()
            .zip(temperatures.into_iter())
            .filter_map(|(date, tobs)| Some(TemperatureObservation::new(date?, tobs?)))
            .collect())
    }

    /// Minimum, average and maximum temperature for all dates `>= start`.
    ///
    /// `start` is compared as a string and never validated; a start beyond the data, or one
    /// that is not a date at all, gives a summary with null aggregates.
    pub fn temperature_since(&self, start: &str) -> Result<TemperatureSummary, ClimateError> {
        let frame = self.store.measurements().filter_since(start);
        let (min, avg, max) = temperature_aggregates(frame)?;
        Ok(TemperatureSummary {
            start: start.to_string(),
            end: None,
            min,
            avg,
            max,
        })
    }

    /// Minimum, average and maximum temperature for `start <= date <= end`.
    ///
    /// Same rules as [`ClimateService::temperature_since`]; `start > end` matches nothing and
    /// gives null aggregates.
    pub fn temperature_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, ClimateError> {
        let frame = self.store.measurements().filter_between(start, end);
        let (min, avg, max) = temperature_aggregates(frame)?;
        Ok(TemperatureSummary {
            start: start.to_string(),
            end: Some(end.to_string()),
            min,
            avg,
            max,
        })
    }
}

type Aggregates = (Option<f64>, Option<f64>, Option<f64>);

fn temperature_aggregates(frame: LazyFrame) -> Result<Aggregates, ClimateError> {
    let df = frame
        .select([
            col(TOBS).min().alias(TMIN),
            col(TOBS).mean().alias(TAVG),
            col(TOBS).max().alias(TMAX),
        ])
        .collect()?;
    Ok((
        first_f64(&df, TMIN)?,
        round_to_tenth(first_f64(&df, TAVG)?),
        first_f64(&df, TMAX)?,
    ))
}

fn first_str(df: &DataFrame, name: &str) -> Result<Option<String>, ClimateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    Ok(df.column(name)?.str()?.get(0).map(str::to_string))
}

fn first_f64(df: &DataFrame, name: &str) -> Result<Option<f64>, ClimateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    Ok(df.column(name)?.f64()?.get(0))
}
