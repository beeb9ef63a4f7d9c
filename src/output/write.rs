use anyhow::{bail, Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array, Int64Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use serde_json::{Map, Value};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

use crate::process::format::VERSION_COLUMN;
use crate::process::{Count, StreamlinedTable};

/// Destination formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("parquet") => Ok(OutputFormat::Parquet),
            Some("json") => Ok(OutputFormat::Json),
            _ => bail!(
                "unsupported output extension for {:?} (expected .csv, .parquet or .json)",
                path
            ),
        }
    }
}

/// Write `table` to `path` in the format its extension names.
pub fn write_table<P: AsRef<Path>>(table: &StreamlinedTable, path: P) -> Result<()> {
    let path = path.as_ref();
    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => write_csv(table, path),
        OutputFormat::Parquet => write_parquet(table, path),
        OutputFormat::Json => write_json(table, path),
    }
}

/// Sibling temp path used for atomic writes: `<dir>/.<name>.tmp`.
fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".into());
    path.with_file_name(format!(".{}.tmp", name))
}

/// CSV with a header row; missing versions are empty fields.
/// Written to a temp file first, then renamed over `path`.
pub fn write_csv(table: &StreamlinedTable, path: &Path) -> Result<()> {
    let tmp_path = tmp_path_for(path);
    {
        let mut wtr = csv::Writer::from_path(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        wtr.write_record(table.headers())
            .context("writing CSV header")?;
        for row in &table.rows {
            let record = std::iter::once(row.version.clone().unwrap_or_default())
                .chain(row.counts.iter().map(Count::to_string));
            wtr.write_record(record).context("writing CSV row")?;
        }
        wtr.flush().context("flushing CSV writer")?;
    }
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    debug!(path = %path.display(), rows = table.rows.len(), "wrote csv");
    Ok(())
}

/// Arrow batch: nullable Utf8 `Version`, then Int64 or Float64 per bucket.
pub fn to_record_batch(table: &StreamlinedTable) -> Result<RecordBatch> {
    let mut fields = vec![Field::new(VERSION_COLUMN, DataType::Utf8, true)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(table.versions()))];

    for (i, bucket) in table.buckets.iter().enumerate() {
        let values: Vec<Count> = table.rows.iter().map(|r| r.counts[i]).collect();
        if values.iter().any(Count::is_float) {
            fields.push(Field::new(bucket.label(), DataType::Float64, false));
            let col: Vec<f64> = values.iter().map(Count::as_f64).collect();
            arrays.push(Arc::new(Float64Array::from(col)));
        } else {
            fields.push(Field::new(bucket.label(), DataType::Int64, false));
            let col: Vec<i64> = values
                .iter()
                .map(|c| match c {
                    Count::Int(i) => *i,
                    Count::Float(f) => *f as i64,
                })
                .collect();
            arrays.push(Arc::new(Int64Array::from(col)));
        }
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("building streamlined record batch")
}

/// Single-batch Parquet file, SNAPPY compressed.
pub fn write_parquet(table: &StreamlinedTable, path: &Path) -> Result<()> {
    let batch = to_record_batch(table)?;
    let file = File::create(path).with_context(|| format!("creating parquet file {:?}", path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer")?;
    writer.write(&batch).context("writing streamlined batch")?;
    writer.close().context("closing parquet writer")?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
    Ok(())
}

/// One JSON object per row, keyed by column label.
pub fn to_json_rows(table: &StreamlinedTable) -> Result<Value> {
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut obj = Map::new();
        obj.insert(
            VERSION_COLUMN.to_string(),
            row.version.clone().map_or(Value::Null, Value::String),
        );
        for (bucket, count) in table.buckets.iter().zip(&row.counts) {
            obj.insert(bucket.label().to_string(), serde_json::to_value(count)?);
        }
        rows.push(Value::Object(obj));
    }
    Ok(Value::Array(rows))
}

/// Pretty-printed JSON array with a trailing newline.
pub fn write_json(table: &StreamlinedTable, path: &Path) -> Result<()> {
    let value = to_json_rows(table)?;
    let mut file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    serde_json::to_writer_pretty(&mut file, &value).context("serializing JSON")?;
    file.write_all(b"\n")?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}
