//! The `measurement` table: one dated observation per station.

use crate::types::table::{ColumnSpec, Table, TableSchema, DATE, PRCP, STATION, TOBS};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the `measurement` table.
///
/// Dates are kept as `YYYY-MM-DD` strings; every range filter in the service compares them
/// lexicographically, which matches chronological order for that format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the reporting station (references [`crate::Station::station`]).
    pub station: String,
    /// Observation date, `YYYY-MM-DD`.
    pub date: String,
    /// Precipitation amount, absent when the station did not report it.
    pub prcp: Option<f64>,
    /// Temperature observation.
    pub tobs: f64,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }

    /// Builds a `DataFrame` with the declared `measurement` layout from a slice of records.
    pub fn to_frame(records: &[Measurement]) -> PolarsResult<DataFrame> {
        let stations: Vec<&str> = records.iter().map(|m| m.station.as_str()).collect();
        let dates: Vec<&str> = records.iter().map(|m| m.date.as_str()).collect();
        let prcp: Vec<Option<f64>> = records.iter().map(|m| m.prcp).collect();
        let tobs: Vec<f64> = records.iter().map(|m| m.tobs).collect();

        df!(
            STATION => stations,
            DATE => dates,
            PRCP => prcp,
            TOBS => tobs
        )
    }
}

impl TableSchema for Measurement {
    const TABLE: Table = Table::Measurement;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::required(STATION, DataType::String),
            ColumnSpec::required(DATE, DataType::String),
            ColumnSpec::optional(PRCP, DataType::Float64),
            ColumnSpec::required(TOBS, DataType::Float64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_frame_keeps_missing_precipitation() -> Result<(), Box<dyn std::error::Error>> {
        let records = vec![
            Measurement::new("USC00519397", "2010-01-01", Some(0.08), 65.0),
            Measurement::new("USC00519397", "2010-01-02", None, 63.0),
        ];

        let df = Measurement::to_frame(&records)?;

        assert_eq!(df.height(), 2);
        assert_eq!(df.column(PRCP)?.null_count(), 1);
        assert_eq!(df.column(DATE)?.str()?.get(1), Some("2010-01-02"));
        for spec in Measurement::columns() {
            assert_eq!(df.column(spec.name)?.dtype(), &spec.dtype);
        }
        Ok(())
    }

    #[test]
    fn test_to_frame_empty_keeps_dtypes() -> Result<(), Box<dyn std::error::Error>> {
        let df = Measurement::to_frame(&[])?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.column(TOBS)?.dtype(), &DataType::Float64);
        assert_eq!(df.column(STATION)?.dtype(), &DataType::String);
        Ok(())
    }
}
