use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record};

/// Column headers a source table must carry, in source order.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["Item", "SalesMan", "Manager", "Region", "Sale_amt", "Units"];

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Failure while reading a sales table into memory. Fatal; surfaced at
/// startup with no recovery.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns named as in [`REQUIRED_COLUMNS`]
/// * `.json`    – records-oriented array: `[{ "Item": ..., "Units": ... }, ...]`
/// * `.csv`     – header row with the required columns, one record per row
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!(
        "loaded {} records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the required column names; extra columns are
/// ignored. Headers are validated up front so a missing column is reported
/// by name instead of failing on the first row.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed {
            row: 0,
            message: format!("reading CSV headers: {e}"),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|e| LoadError::Malformed {
            row: row_no,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Item": "Desk",
///     "SalesMan": "Alex",
///     "Manager": "Martha",
///     "Region": "East",
///     "Sale_amt": 125.0,
///     "Units": 5
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| LoadError::Malformed {
        row: 0,
        message: "expected top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| LoadError::Malformed {
            row: row_no,
            message: "not a JSON object".to_string(),
        })?;

        let field = |name: &'static str| -> Result<&JsonValue, LoadError> {
            obj.get(name).ok_or(LoadError::MissingColumn(name))
        };
        let string_field = |name: &'static str| -> Result<String, LoadError> {
            field(name)?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| LoadError::Malformed {
                    row: row_no,
                    message: format!("'{name}' is not a string"),
                })
        };

        let sale_amount =
            field("Sale_amt")?
                .as_f64()
                .ok_or_else(|| LoadError::Malformed {
                    row: row_no,
                    message: "'Sale_amt' is not a number".to_string(),
                })?;
        let units = field("Units")?
            .as_i64()
            .ok_or_else(|| LoadError::Malformed {
                row: row_no,
                message: "'Units' is not an integer".to_string(),
            })?;

        records.push(Record {
            item: string_field("Item")?,
            sales_man: string_field("SalesMan")?,
            manager: string_field("Manager")?,
            region: string_field("Region")?,
            sale_amount,
            units,
        });
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing sales data.
///
/// Expected schema: flat columns named as in [`REQUIRED_COLUMNS`], with
/// Utf8 dimensions and numeric `Sale_amt` / `Units`. Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`), whose integer and float widths differ.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<&Arc<dyn Array>, LoadError> {
            schema
                .index_of(name)
                .map(|i| batch.column(i))
                .map_err(|_| LoadError::MissingColumn(name))
        };

        let item_col = column("Item")?;
        let sales_man_col = column("SalesMan")?;
        let manager_col = column("Manager")?;
        let region_col = column("Region")?;
        let sale_amt_col = column("Sale_amt")?;
        let units_col = column("Units")?;

        for row in 0..batch.num_rows() {
            records.push(Record {
                item: string_value(item_col, row, "Item")?,
                sales_man: string_value(sales_man_col, row, "SalesMan")?,
                manager: string_value(manager_col, row, "Manager")?,
                region: string_value(region_col, row, "Region")?,
                sale_amount: f64_value(sale_amt_col, row, "Sale_amt")?,
                units: i64_value(units_col, row, "Units")?,
            });
        }
    }

    Ok(Dataset::new(records))
}

// -- Parquet / Arrow helpers --

fn non_null(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<(), LoadError> {
    if col.is_null(row) {
        return Err(LoadError::Malformed {
            row,
            message: format!("null value in column '{name}'"),
        });
    }
    Ok(())
}

fn string_value(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<String, LoadError> {
    non_null(col, row, name)?;
    match col.data_type() {
        DataType::Utf8 => {
            if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
                return Ok(arr.value(row).to_string());
            }
        }
        DataType::LargeUtf8 => {
            return Ok(col.as_string::<i64>().value(row).to_string());
        }
        _ => {}
    }
    Err(LoadError::Malformed {
        row,
        message: format!("column '{name}' is {:?}, expected Utf8", col.data_type()),
    })
}

fn f64_value(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<f64, LoadError> {
    non_null(col, row, name)?;
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64),
        _ => None,
    };
    value.ok_or_else(|| LoadError::Malformed {
        row,
        message: format!("column '{name}' is {:?}, expected numeric", col.data_type()),
    })
}

fn i64_value(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<i64, LoadError> {
    non_null(col, row, name)?;
    let value = match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row)),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| i64::from(arr.value(row))),
        _ => None,
    };
    value.ok_or_else(|| LoadError::Malformed {
        row,
        message: format!("column '{name}' is {:?}, expected integer", col.data_type()),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "sales.csv",
            "Item,SalesMan,Manager,Region,Sale_amt,Units\n\
             Desk,Alex,Martha,East,125.5,5\n\
             Chair,Bala,Douglas,West,250.0,10\n",
        );

        let dataset = load_file(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].item, "Desk");
        assert_eq!(dataset.records[0].sale_amount, 125.5);
        assert_eq!(dataset.records[1].units, 10);
    }

    #[test]
    fn csv_missing_column_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "sales.csv",
            "Item,SalesMan,Manager,Sale_amt,Units\nDesk,Alex,Martha,125.5,5\n",
        );

        match load_file(&path) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Region"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_bad_number_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "sales.csv",
            "Item,SalesMan,Manager,Region,Sale_amt,Units\n\
             Desk,Alex,Martha,East,lots,5\n",
        );

        assert!(matches!(
            load_file(&path),
            Err(LoadError::Malformed { row: 0, .. })
        ));
    }

    #[test]
    fn loads_records_oriented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "sales.json",
            r#"[
                {"Item":"Desk","SalesMan":"Alex","Manager":"Martha",
                 "Region":"East","Sale_amt":125.5,"Units":5}
            ]"#,
        );

        let dataset = load_file(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].manager, "Martha");
        assert_eq!(dataset.records[0].units, 5);
    }

    #[test]
    fn json_missing_key_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "sales.json",
            r#"[{"Item":"Desk","SalesMan":"Alex","Manager":"Martha","Region":"East","Units":5}]"#,
        );

        match load_file(&path) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Sale_amt"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn loads_parquet_written_by_arrow() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Item", DataType::Utf8, false),
            Field::new("SalesMan", DataType::Utf8, false),
            Field::new("Manager", DataType::Utf8, false),
            Field::new("Region", DataType::Utf8, false),
            Field::new("Sale_amt", DataType::Float64, false),
            Field::new("Units", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Desk", "Chair"])),
                Arc::new(StringArray::from(vec!["Alex", "Bala"])),
                Arc::new(StringArray::from(vec!["Martha", "Douglas"])),
                Arc::new(StringArray::from(vec!["East", "West"])),
                Arc::new(Float64Array::from(vec![125.5, 250.0])),
                Arc::new(Int64Array::from(vec![5, 10])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let dataset = load_file(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[1].sales_man, "Bala");
        assert_eq!(dataset.records[1].sale_amount, 250.0);
    }

    #[test]
    fn rejects_unsupported_extension() {
        assert!(matches!(
            load_file(Path::new("sales.xlsx")),
            Err(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_file(Path::new("/nonexistent/sales.csv")),
            Err(LoadError::Io { .. })
        ));
    }
}
