use crate::process::aggregate::Aggregated;
use crate::process::classify::StatusBucket;
use crate::process::convert::Count;
use crate::process::version::add_prefix;
use serde::Serialize;

pub const VERSION_COLUMN: &str = "Version";

/// One output row: a version label and one count per present bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRow {
    pub version: Option<String>,
    pub counts: Vec<Count>,
}

/// The canonical table: `Version` followed by the present buckets in
/// [`StatusBucket::CANONICAL_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamlinedTable {
    pub buckets: Vec<StatusBucket>,
    pub rows: Vec<CanonicalRow>,
}

impl StreamlinedTable {
    /// Column labels, starting with `Version`.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(VERSION_COLUMN.to_string())
            .chain(self.buckets.iter().map(|b| b.label().to_string()))
            .collect()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.buckets.len() + 1)
    }

    /// Column values of `bucket`, or `None` if it is not in the table.
    pub fn column(&self, bucket: StatusBucket) -> Option<Vec<Count>> {
        let idx = self.buckets.iter().position(|b| *b == bucket)?;
        Some(self.rows.iter().map(|r| r.counts[idx]).collect())
    }

    /// Sum of a bucket over every row, or `None` if it is not in the table.
    pub fn total(&self, bucket: StatusBucket) -> Option<Count> {
        self.column(bucket)
            .map(|values| values.into_iter().fold(Count::ZERO, |acc, v| acc + v))
    }

    pub fn versions(&self) -> Vec<Option<String>> {
        self.rows.iter().map(|r| r.version.clone()).collect()
    }

    /// Tab-separated header plus the first `limit` rows, for terminal output.
    pub fn preview(&self, limit: usize) -> String {
        let mut out = self.headers().join("\t");
        for row in self.rows.iter().take(limit) {
            out.push('\n');
            out.push_str(row.version.as_deref().unwrap_or(""));
            for c in &row.counts {
                out.push('\t');
                out.push_str(&c.to_string());
            }
        }
        out
    }
}

/// Order bucket columns canonically and prefix every version with `v`.
pub fn format_table(aggregated: Aggregated) -> StreamlinedTable {
    let Aggregated { versions, columns } = aggregated;

    let ordered: Vec<_> = StatusBucket::CANONICAL_ORDER
        .iter()
        .filter_map(|bucket| columns.iter().find(|c| c.bucket == *bucket))
        .collect();

    let rows = versions
        .iter()
        .enumerate()
        .map(|(i, version)| CanonicalRow {
            version: add_prefix(version.as_deref()),
            counts: ordered
                .iter()
                .map(|c| c.values.get(i).copied().unwrap_or(Count::ZERO))
                .collect(),
        })
        .collect();

    StreamlinedTable {
        buckets: ordered.iter().map(|c| c.bucket).collect(),
        rows,
    }
}
