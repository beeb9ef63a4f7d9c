use crate::process::classify::BucketColumn;
use crate::process::convert::{unify_column, Count};
use std::collections::BTreeMap;
use tracing::debug;

/// Version labels and their bucket columns, row-aligned: `columns[c].values[r]`
/// belongs to `versions[r]`. A column shorter than `versions` reads as zero
/// for the rows it lacks; extra values are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated {
    pub versions: Vec<Option<String>>,
    pub columns: Vec<BucketColumn>,
}

/// Collapse rows sharing a version label into one row, summing every bucket.
///
/// Groups come out in lexical order of the label ("1.17" before "1.2").
/// Rows without a label form one trailing group of their own.
pub fn group_by_version(versions: Vec<Option<String>>, columns: Vec<BucketColumn>) -> Aggregated {
    let width = columns.len();
    let mut groups: BTreeMap<String, Vec<Count>> = BTreeMap::new();
    let mut missing: Option<Vec<Count>> = None;

    for (row, version) in versions.iter().enumerate() {
        let acc = match version {
            Some(label) => groups
                .entry(label.clone())
                .or_insert_with(|| vec![Count::ZERO; width]),
            None => missing.get_or_insert_with(|| vec![Count::ZERO; width]),
        };
        for (slot, col) in acc.iter_mut().zip(&columns) {
            *slot += col.values.get(row).copied().unwrap_or(Count::ZERO);
        }
    }

    debug!(
        rows_in = versions.len(),
        groups = groups.len() + usize::from(missing.is_some()),
        "grouped by version"
    );

    let mut out_versions = Vec::with_capacity(groups.len() + 1);
    let mut out_values: Vec<Vec<Count>> = vec![Vec::with_capacity(groups.len() + 1); width];
    let keyed = groups
        .into_iter()
        .map(|(k, v)| (Some(k), v))
        .chain(missing.map(|v| (None, v)));
    for (version, sums) in keyed {
        out_versions.push(version);
        for (col, v) in out_values.iter_mut().zip(sums) {
            col.push(v);
        }
    }

    let columns = columns
        .into_iter()
        .zip(out_values)
        .map(|(col, mut values)| {
            unify_column(&mut values);
            BucketColumn {
                bucket: col.bucket,
                values,
            }
        })
        .collect();

    Aggregated {
        versions: out_versions,
        columns,
    }
}

/// Optionally merge rows by version; without merging rows pass through 1:1.
pub fn aggregate(
    versions: Vec<Option<String>>,
    columns: Vec<BucketColumn>,
    merge_versions: bool,
) -> Aggregated {
    if merge_versions {
        group_by_version(versions, columns)
    } else {
        Aggregated { versions, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::classify::StatusBucket;

    fn done(values: Vec<Count>) -> Vec<BucketColumn> {
        vec![BucketColumn {
            bucket: StatusBucket::Done,
            values,
        }]
    }

    fn v(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn groups_sort_lexically() {
        let out = group_by_version(
            vec![v("1.2"), v("1.17"), v("1.2"), v("1.16")],
            done(vec![Count::Int(8), Count::Int(1), Count::Int(4), Count::Int(2)]),
        );
        assert_eq!(out.versions, vec![v("1.16"), v("1.17"), v("1.2")]);
        assert_eq!(
            out.columns[0].values,
            vec![Count::Int(2), Count::Int(1), Count::Int(12)]
        );
    }

    #[test]
    fn missing_labels_form_their_own_trailing_group() {
        let out = group_by_version(
            vec![None, v("1.0"), None],
            done(vec![Count::Int(1), Count::Int(5), Count::Int(2)]),
        );
        assert_eq!(out.versions, vec![v("1.0"), None]);
        assert_eq!(out.columns[0].values, vec![Count::Int(5), Count::Int(3)]);
    }

    #[test]
    fn disabled_merge_keeps_rows() {
        let versions = vec![v("1.2"), v("1.2"), v("1.1")];
        let cols = done(vec![Count::Int(1), Count::Int(2), Count::Int(3)]);
        let out = aggregate(versions.clone(), cols.clone(), false);
        assert_eq!(out.versions, versions);
        assert_eq!(out.columns, cols);
    }

    #[test]
    fn grouping_preserves_float_columns() {
        let out = group_by_version(
            vec![v("1.0"), v("1.0")],
            done(vec![Count::Float(0.5), Count::Float(1.0)]),
        );
        assert_eq!(out.columns[0].values, vec![Count::Float(1.5)]);
    }

    #[test]
    fn short_columns_count_as_zero() {
        let out = group_by_version(
            vec![v("1.0"), v("1.0"), v("2.0")],
            done(vec![Count::Int(4)]),
        );
        assert_eq!(out.versions, vec![v("1.0"), v("2.0")]);
        assert_eq!(out.columns[0].values, vec![Count::Int(4), Count::Int(0)]);
    }

    #[test]
    fn no_bucket_columns_still_groups_versions() {
        let out = group_by_version(vec![v("b"), v("a"), v("b")], Vec::new());
        assert_eq!(out.versions, vec![v("a"), v("b")]);
        assert!(out.columns.is_empty());
    }
}
