use crate::store::error::StoreError;
use crate::types::table::TableSchema;
use log::{debug, info};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// On-disk formats the loader understands, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "parquet" | "pq" => Some(FileFormat::Parquet),
            _ => None,
        }
    }
}

/// Reads one table from disk and conforms it to the layout declared by `T`.
pub(crate) fn read_table<T: TableSchema>(path: &Path) -> Result<DataFrame, StoreError> {
    let table = T::TABLE;
    let format = FileFormat::from_path(path).ok_or_else(|| StoreError::UnsupportedFormat {
        table,
        path: path.to_path_buf(),
    })?;

    std::fs::metadata(path).map_err(|source| StoreError::FileRead {
        table,
        path: path.to_path_buf(),
        source,
    })?;

    let frame = match format {
        FileFormat::Csv => read_csv::<T>(path)?.lazy(),
        FileFormat::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .map_err(|source| StoreError::ParquetScan {
                table,
                path: path.to_path_buf(),
                source,
            })?,
    };

    let df = conform::<T>(frame)?;
    info!(
        "Loaded {} {} rows from {}",
        df.height(),
        table,
        path.display()
    );
    Ok(df)
}

fn read_csv<T: TableSchema>(path: &Path) -> Result<DataFrame, StoreError> {
    let csv_error = |source: PolarsError| StoreError::CsvRead {
        table: T::TABLE,
        path: path.to_path_buf(),
        source,
    };

    // Columns not declared by `T` (e.g. a surrogate `id`) are still inferred and dropped later.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(T::schema())))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)
}

/// Projects `frame` onto the declared columns of `T`, checking presence, dtype and nullability.
///
/// Integer or `f32` columns are accepted where `f64` is declared and cast up; any other
/// difference is a [`StoreError::SchemaMismatch`].
pub(crate) fn conform<T: TableSchema>(mut frame: LazyFrame) -> Result<DataFrame, StoreError> {
    let table = T::TABLE;
    let schema = frame.collect_schema()?;
    let columns = T::columns();

    let mut projection = Vec::with_capacity(columns.len());
    for spec in &columns {
        let found = schema
            .get(spec.name)
            .ok_or_else(|| StoreError::MissingColumn {
                table,
                column: spec.name.to_string(),
            })?;
        if !is_compatible(found, &spec.dtype, spec.nullable) {
            return Err(StoreError::SchemaMismatch {
                table,
                column: spec.name.to_string(),
                expected: spec.dtype.clone(),
                found: found.clone(),
            });
        }
        if found != &spec.dtype {
            debug!(
                "Casting {} column '{}' from {} to {}",
                table, spec.name, found, spec.dtype
            );
        }
        projection.push(col(spec.name).cast(spec.dtype.clone()));
    }

    let df = frame.select(projection).collect()?;

    for spec in columns.iter().filter(|spec| !spec.nullable) {
        let count = df.column(spec.name)?.null_count();
        if count > 0 {
            return Err(StoreError::NullValues {
                table,
                column: spec.name.to_string(),
                count,
            });
        }
    }

    Ok(df)
}

fn is_compatible(found: &DataType, expected: &DataType, nullable: bool) -> bool {
    if found == expected {
        return true;
    }
    match (found, expected) {
        // An all-null column carries no type of its own.
        (DataType::Null, _) => nullable,
        (
            DataType::Float32
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64,
            DataType::Float64,
        ) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::measurement::Measurement;
    use crate::types::station::Station;
    use crate::types::table::{Table, ELEVATION, NAME, PRCP, STATION, TOBS};
    use std::fs;
    use tempfile::TempDir;

    const MEASUREMENT_CSV: &str = "\
station,date,prcp,tobs
USC00519397,2010-01-01,0.08,65.0
USC00519397,2010-01-02,,63.0
USC00513117,2010-01-01,0.28,67.0
";

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("Resources/hawaii_measurements.csv")),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("stations.PARQUET")),
            Some(FileFormat::Parquet)
        );
        assert_eq!(FileFormat::from_path(Path::new("hawaii.sqlite")), None);
        assert_eq!(FileFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_read_csv_measurements() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("measurements.csv");
        fs::write(&path, MEASUREMENT_CSV)?;

        let df = read_table::<Measurement>(&path)?;

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 4);
        assert_eq!(df.column(PRCP)?.null_count(), 1);
        assert_eq!(df.column(TOBS)?.f64()?.get(2), Some(67.0));
        Ok(())
    }

    #[test]
    fn test_read_csv_drops_undeclared_columns() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("stations.csv");
        fs::write(
            &path,
            "id,station,name,latitude,longitude,elevation\n\
             1,USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3\n\
             2,USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6\n",
        )?;

        let df = read_table::<Station>(&path)?;

        assert_eq!(df.width(), 5);
        assert!(df.column("id").is_err());
        assert_eq!(df.column(NAME)?.str()?.get(0), Some("WAIKIKI 717.2, HI US"));
        assert_eq!(df.column(ELEVATION)?.f64()?.get(0), Some(3.0));
        Ok(())
    }

    #[test]
    fn test_read_csv_missing_column() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("measurements.csv");
        fs::write(&path, "station,date,prcp\nUSC00519397,2010-01-01,0.08\n")?;

        let err = read_table::<Measurement>(&path).unwrap_err();

        assert!(
            matches!(
                err,
                StoreError::MissingColumn { table: Table::Measurement, ref column } if column == TOBS
            ),
            "unexpected error: {err}"
        );
        Ok(())
    }

    #[test]
    fn test_read_csv_rejects_null_temperature() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("measurements.csv");
        fs::write(
            &path,
            "station,date,prcp,tobs\nUSC00519397,2010-01-01,0.08,\n",
        )?;

        let err = read_table::<Measurement>(&path).unwrap_err();

        assert!(
            matches!(err, StoreError::NullValues { ref column, count: 1, .. } if column == TOBS),
            "unexpected error: {err}"
        );
        Ok(())
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_table::<Measurement>(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, StoreError::FileRead { .. }));
    }

    #[test]
    fn test_read_unsupported_format() {
        let err = read_table::<Station>(Path::new("Resources/hawaii.sqlite")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedFormat {
                table: Table::Station,
                ..
            }
        ));
    }

    #[test]
    fn test_read_parquet_casts_integer_columns() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("stations.parquet");
        let mut df = df!(
            STATION => ["USC00519397", "USC00513117"],
            NAME => [Some("WAIKIKI 717.2, HI US"), None],
            "latitude" => [21.2716, 21.4234],
            "longitude" => [-157.8168, -157.8015],
            ELEVATION => [3i64, 14i64]
        )?;
        let file = fs::File::create(&path)?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)?;

        let loaded = read_table::<Station>(&path)?;

        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.column(ELEVATION)?.dtype(), &DataType::Float64);
        assert_eq!(loaded.column(ELEVATION)?.f64()?.get(1), Some(14.0));
        Ok(())
    }

    #[test]
    fn test_conform_rejects_string_temperature() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            STATION => ["USC00519397"],
            "date" => ["2010-01-01"],
            PRCP => [Some(0.1)],
            TOBS => ["warm"]
        )?;

        let err = conform::<Measurement>(df.lazy()).unwrap_err();

        assert!(
            matches!(
                err,
                StoreError::SchemaMismatch { ref column, found: DataType::String, .. } if column == TOBS
            ),
            "unexpected error: {err}"
        );
        Ok(())
    }
}
