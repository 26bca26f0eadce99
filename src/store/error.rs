use crate::types::table::Table;
use polars::error::PolarsError;
use polars::prelude::DataType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {table} data file '{path}'")]
    FileRead {
        table: Table,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format for {table} data '{path}' (expected .csv or .parquet)")]
    UnsupportedFormat { table: Table, path: PathBuf },

    #[error("Parsing error reading CSV {table} data from '{path}'")]
    CsvRead {
        table: Table,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to scan parquet {table} data from '{path}'")]
    ParquetScan {
        table: Table,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in {table} data")]
    MissingColumn { table: Table, column: String },

    #[error("Column '{column}' in {table} data has type {found}, expected {expected}")]
    SchemaMismatch {
        table: Table,
        column: String,
        expected: DataType,
        found: DataType,
    },

    #[error("Column '{column}' in {table} data contains {count} null value(s)")]
    NullValues {
        table: Table,
        column: String,
        count: usize,
    },

    #[error("Station '{0}' appears more than once in station data")]
    DuplicateStation(String),

    #[error("Measurement date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
