//! The `station` table: metadata for each weather-reporting site.

use crate::types::table::{
    ColumnSpec, Table, TableSchema, ELEVATION, LATITUDE, LONGITUDE, NAME, STATION,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the `station` table.
///
/// Only [`Station::station`] is exposed by the API; the descriptive fields are loaded and
/// validated so the full source table is available to library users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// The unique station code (e.g. "USC00519281").
    pub station: String,
    /// Human-readable site name, if known.
    pub name: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Elevation above sea level.
    pub elevation: Option<f64>,
}

impl Station {
    /// A station with only its identifier set.
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            name: None,
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64, elevation: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.elevation = Some(elevation);
        self
    }

    /// Builds a `DataFrame` with the declared `station` layout from a slice of records.
    pub fn to_frame(records: &[Station]) -> PolarsResult<DataFrame> {
        let ids: Vec<&str> = records.iter().map(|s| s.station.as_str()).collect();
        let names: Vec<Option<&str>> = records.iter().map(|s| s.name.as_deref()).collect();
        let latitudes: Vec<Option<f64>> = records.iter().map(|s| s.latitude).collect();
        let longitudes: Vec<Option<f64>> = records.iter().map(|s| s.longitude).collect();
        let elevations: Vec<Option<f64>> = records.iter().map(|s| s.elevation).collect();

        df!(
            STATION => ids,
            NAME => names,
            LATITUDE => latitudes,
            LONGITUDE => longitudes,
            ELEVATION => elevations
        )
    }
}

impl TableSchema for Station {
    const TABLE: Table = Table::Station;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::required(STATION, DataType::String),
            ColumnSpec::optional(NAME, DataType::String),
            ColumnSpec::optional(LATITUDE, DataType::Float64),
            ColumnSpec::optional(LONGITUDE, DataType::Float64),
            ColumnSpec::optional(ELEVATION, DataType::Float64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_frame_preserves_row_order() -> Result<(), Box<dyn std::error::Error>> {
        let records = vec![
            Station::new("USC00519397")
                .with_name("WAIKIKI 717.2, HI US")
                .with_location(21.2716, -157.8168, 3.0),
            Station::new("USC00513117"),
        ];

        let df = Station::to_frame(&records)?;
        let ids: Vec<Option<&str>> = df.column(STATION)?.str()?.into_iter().collect();

        assert_eq!(ids, vec![Some("USC00519397"), Some("USC00513117")]);
        assert_eq!(df.column(NAME)?.null_count(), 1);
        assert_eq!(df.column(ELEVATION)?.f64()?.get(0), Some(3.0));
        Ok(())
    }
}
