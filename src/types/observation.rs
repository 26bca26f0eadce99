//! Response shapes produced by the query service.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Precipitation per date for the last year of data.
///
/// Keys are `YYYY-MM-DD` dates in ascending order. A date reported by several stations holds the
/// value of the last row read for it. Missing precipitation is kept as `None` and serializes
/// as JSON `null`.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// One temperature reading, serialized as a single-entry object `{"<date>": <tobs>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

impl TemperatureObservation {
    pub fn new(date: impl Into<String>, tobs: f64) -> Self {
        Self {
            date: date.into(),
            tobs,
        }
    }
}

impl Serialize for TemperatureObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.tobs)?;
        map.end()
    }
}

/// Minimum, average and maximum temperature over a date range.
///
/// All three aggregates are `None` when no measurement falls in the range. `end` is only
/// present for bounded ranges and is left out of the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "Start Date")]
    pub start: String,
    #[serde(rename = "End Date", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    /// Rounded to one decimal place.
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}
