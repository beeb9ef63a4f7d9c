use crate::process::convert::{cell_to_count, unify_column, Count};
use crate::process::raw_table::RawTable;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Canonical status columns of a streamlined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatusBucket {
    #[serde(rename = "In QA")]
    InQa,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Internal Test")]
    InternalTest,
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl StatusBucket {
    /// Output order, after the Version column.
    pub const CANONICAL_ORDER: [StatusBucket; 6] = [
        StatusBucket::InQa,
        StatusBucket::InReview,
        StatusBucket::InternalTest,
        StatusBucket::ToDo,
        StatusBucket::InProgress,
        StatusBucket::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusBucket::InQa => "In QA",
            StatusBucket::InReview => "In Review",
            StatusBucket::InternalTest => "Internal Test",
            StatusBucket::ToDo => "To Do",
            StatusBucket::InProgress => "In Progress",
            StatusBucket::Done => "Done",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword table, evaluated top to bottom. Keywords are lowercase substrings.
pub const BUCKET_KEYWORDS: &[(StatusBucket, &[&str])] = &[
    (StatusBucket::Done, &["done"]),
    (StatusBucket::InQa, &["in qa", "qa"]),
    (StatusBucket::InReview, &["in review", "review"]),
    (StatusBucket::ToDo, &["to do", "todo"]),
    (StatusBucket::InternalTest, &["internal test"]),
    (StatusBucket::InProgress, &["in progress"]),
];

/// Buckets with the indices (into the labels handed to [`classify_columns`])
/// of the columns feeding them, in keyword-table order.
pub type BucketAssignment = Vec<(StatusBucket, Vec<usize>)>;

/// A bucket and its per-row summed counts.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketColumn {
    pub bucket: StatusBucket,
    pub values: Vec<Count>,
}

/// True if the lowercased `label` contains any of `keywords`.
pub fn label_matches(label: &str, keywords: &[&str]) -> bool {
    let lower = label.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Assign columns to buckets by keyword. A column is not consumed by its first
/// match: "QA Review" feeds both In QA and In Review. Buckets without any
/// matching column are left out.
pub fn classify_columns<S: AsRef<str>>(labels: &[S]) -> BucketAssignment {
    BUCKET_KEYWORDS
        .iter()
        .filter_map(|(bucket, keywords)| {
            let matching: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, label)| label_matches(label.as_ref(), keywords))
                .map(|(i, _)| i)
                .collect();
            if matching.is_empty() {
                None
            } else {
                debug!(bucket = %bucket, columns = ?matching, "classified");
                Some((*bucket, matching))
            }
        })
        .collect()
}

/// Sum the assigned status columns of `table` row by row.
///
/// Column indices in `assignment` refer to [`RawTable::status_headers`], so
/// the version column is never counted.
pub fn sum_buckets(table: &RawTable, assignment: &BucketAssignment) -> Vec<BucketColumn> {
    let n_rows = table.rows.len();
    assignment
        .iter()
        .map(|(bucket, cols)| {
            let mut values: Vec<Count> = (0..n_rows)
                .map(|row| {
                    cols.iter()
                        .filter_map(|&c| cell_to_count(table.cell(row, c + 1)))
                        .fold(Count::ZERO, |acc, v| acc + v)
                })
                .collect();
            unify_column(&mut values);
            BucketColumn {
                bucket: *bucket,
                values,
            }
        })
        .collect()
}
