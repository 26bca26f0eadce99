//! Static table layouts for the two record collections served by the API.
//!
//! Each record type declares its columns once through [`TableSchema`]; the loader checks
//! incoming files against that declaration at startup instead of inferring a schema.

use polars::prelude::{DataType, PlSmallStr, Schema};
use std::fmt;

pub(crate) const STATION: &str = "station";
pub(crate) const DATE: &str = "date";
pub(crate) const PRCP: &str = "prcp";
pub(crate) const TOBS: &str = "tobs";
pub(crate) const NAME: &str = "name";
pub(crate) const LATITUDE: &str = "latitude";
pub(crate) const LONGITUDE: &str = "longitude";
pub(crate) const ELEVATION: &str = "elevation";

/// Identifies one of the two tables of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Daily observations, one row per station and date.
    Measurement,
    /// Station metadata, one row per station.
    Station,
}

impl Table {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Table::Measurement => "measurement",
            Table::Station => "station",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single declared column: name, Polars dtype and whether nulls are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub dtype: DataType,
    pub nullable: bool,
}

impl ColumnSpec {
    pub(crate) fn required(name: &'static str, dtype: DataType) -> Self {
        Self {
            name,
            dtype,
            nullable: false,
        }
    }

    pub(crate) fn optional(name: &'static str, dtype: DataType) -> Self {
        Self {
            name,
            dtype,
            nullable: true,
        }
    }
}

/// Implemented by record types that map one-to-one onto a table of the dataset.
pub trait TableSchema {
    /// Which table the record belongs to.
    const TABLE: Table;

    /// The declared columns, in storage order.
    fn columns() -> Vec<ColumnSpec>;

    /// The Polars schema built from [`TableSchema::columns`].
    fn schema() -> Schema {
        Schema::from_iter(
            Self::columns()
                .into_iter()
                .map(|spec| (PlSmallStr::from_static(spec.name), spec.dtype)),
        )
    }
}
