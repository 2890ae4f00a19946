use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, DataResult};
use super::model::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (default for unknown/no extension)
/// * `.json`    – `[{ "Year": 2001, "Genre": "Drama", ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> DataResult<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" | "tsv" | "txt" | "" => load_csv(path),
        other => Err(anyhow::anyhow!("Unsupported file extension: .{other}")),
    };

    loaded.map_err(|cause| DataError::Load {
        path: path.to_path_buf(),
        cause,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, then records of the same width.
/// `.tsv` files are read tab-separated.
fn load_csv(path: &Path) -> Result<Table> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file, delimiter)
}

/// Parse delimited text from any reader.
pub fn read_csv<R: std::io::Read>(input: R, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.iter().all(|c| c.is_empty()) {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(Row::new(record.iter().map(CellValue::parse).collect()));
    }

    Ok(Table::new(columns, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`).
/// Columns are the union of keys in order of first appearance
/// (`serde_json` is built with `preserve_order`).
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut parsed: Vec<BTreeMap<String, CellValue>> = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            cells.insert(key.clone(), json_to_cell(val));
        }
        parsed.push(cells);
    }

    if columns.is_empty() {
        bail!("JSON file contains no columns");
    }

    let rows = parsed
        .into_iter()
        .map(|mut cells| {
            Row::new(
                columns
                    .iter()
                    .map(|c| cells.remove(c).unwrap_or(CellValue::Null))
                    .collect(),
            )
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with scalar columns (strings, ints, floats, bools).
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect();
            rows.push(Row::new(values));
        }
    }

    Ok(Table::new(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => float_cell(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => CellValue::Text(format!("{other:?}")),
    }
}

/// Pandas writes missing floats as NaN; treat any non-finite value as missing.
fn float_cell(v: f64) -> CellValue {
    if v.is_finite() {
        CellValue::Float(v)
    } else {
        CellValue::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_typed_cells() {
        let csv = "Year,Genre,Score\n2001,Drama,10\n2002,Comedy,7.5\n";
        let table = read_csv(csv.as_bytes(), b',').unwrap();
        assert_eq!(table.columns(), &["Year", "Genre", "Score"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "Score"), Some(&CellValue::Float(7.5)));
        assert_eq!(table.cell(0, "Year"), Some(&CellValue::Integer(2001)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let csv = "Year,Genre,Score\n2001,Drama\n";
        assert!(read_csv(csv.as_bytes(), b',').is_err());
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(read_csv("".as_bytes(), b',').is_err());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataError::Load { .. }));
    }

    #[test]
    fn unsupported_extension_is_a_load_error() {
        let err = load_file(Path::new("albums.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn non_finite_floats_are_missing() {
        assert_eq!(float_cell(7.5), CellValue::Float(7.5));
        assert_eq!(float_cell(f64::NAN), CellValue::Null);
        assert_eq!(float_cell(f64::INFINITY), CellValue::Null);
    }
}
