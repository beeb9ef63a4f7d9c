// src/process/mod.rs
pub mod aggregate;
pub mod classify;
pub mod convert;
pub mod format;
pub mod raw_table;
pub mod sample;
pub mod utils;
pub mod version;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, warn};

pub use classify::StatusBucket;
pub use convert::Count;
pub use format::{CanonicalRow, StreamlinedTable};
pub use raw_table::{Cell, RawTable};

/// The two switches of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamlineOptions {
    /// Normalize version labels and collapse rows sharing one.
    pub merge_versions: bool,
    /// With `merge_versions`, also fold patch releases into major.minor.
    pub merge_minor_versions: bool,
}

impl Default for StreamlineOptions {
    fn default() -> Self {
        Self {
            merge_versions: true,
            merge_minor_versions: true,
        }
    }
}

/// Canonicalize a raw export.
///
/// - Version labels are normalized (and cut to major.minor) only when merging.
/// - Status columns are classified into buckets and summed per row.
/// - Rows are grouped by version when merging, else kept 1:1 in input order.
/// - Buckets are put in canonical order and versions get their `v` prefix.
///
/// The table is taken by value; the caller's copy is never touched.
#[tracing::instrument(
    level = "debug",
    skip(table),
    fields(rows = table.rows.len(), cols = table.headers.len())
)]
pub fn streamline(table: RawTable, options: StreamlineOptions) -> StreamlinedTable {
    // 1) version column
    let versions: Vec<Option<String>> = if options.merge_versions {
        table
            .version_column()
            .iter()
            .map(|v| version::canonical_key(v.as_deref(), options.merge_minor_versions))
            .collect()
    } else {
        table.version_column()
    };

    // 2) classify + sum status columns
    let assignment = classify::classify_columns(table.status_headers());
    let columns = classify::sum_buckets(&table, &assignment);
    debug!(buckets = assignment.len(), "status columns classified");

    // 3) group by version
    let aggregated = aggregate::aggregate(versions, columns, options.merge_versions);

    // 4) canonical order + prefix
    format::format_table(aggregated)
}

/// Parse CSV from `reader` into a [`RawTable`].
///
/// Repeated header labels are disambiguated with `.N` suffixes. The first
/// column is kept as verbatim text; every other cell is inferred (missing,
/// int, float, text). Blank fields and NA markers load as `Missing` everywhere.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are padded below
        .from_reader(reader);

    let raw_headers = rdr.headers().context("reading CSV header row")?.clone();
    if raw_headers.is_empty() {
        bail!("CSV has no header row");
    }
    let headers = raw_table::disambiguate_headers(raw_headers.iter().map(utils::clean_str));
    let width = headers.len();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        if record.len() > width {
            warn!(
                record = idx + 1,
                fields = record.len(),
                width,
                "dropping fields beyond the header width"
            );
        }
        let mut row: Vec<Cell> = record
            .iter()
            .take(width)
            .enumerate()
            .map(|(i, field)| {
                if i == 0 {
                    utils::infer_version_cell(field)
                } else {
                    utils::infer_cell(field)
                }
            })
            .collect();
        row.resize(width, Cell::Missing);
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}

/// Open `path` and parse it with [`read_csv`].
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    let table = read_csv(file)
        .with_context(|| format!("Failed to read CSV file: {:?}", path.as_ref()))?;
    let (rows, cols) = table.shape();
    info!(rows, cols, "loaded export");
    Ok(table)
}
