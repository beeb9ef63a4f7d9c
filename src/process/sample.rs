use crate::process::raw_table::{Cell, RawTable};

const SAMPLE_VERSIONS: [&str; 7] = ["1.16", "1.17", "1.17.2", "1.17.5", "1.18", "1.19", "1.2"];

/// Column label and per-row counts, aligned with `SAMPLE_VERSIONS`.
const SAMPLE_COLUMNS: [(&str, [i64; 7]); 13] = [
    ("IN QA", [0, 0, 0, 0, 0, 0, 0]),
    ("IN REVIEW", [0, 0, 0, 0, 0, 0, 0]),
    ("INTERNAL TEST", [0, 0, 0, 0, 0, 0, 0]),
    ("In QA", [0, 0, 0, 0, 0, 0, 0]),
    ("In Review", [0, 0, 0, 0, 0, 0, 0]),
    ("To Do", [1, 0, 0, 0, 0, 0, 5]),
    ("In Progress", [0, 0, 0, 0, 0, 0, 0]),
    ("Done", [2, 0, 1, 0, 5, 1, 8]),
    ("To Do.1", [1, 0, 0, 0, 8, 0, 0]),
    ("Done.1", [1, 0, 0, 4, 6, 0, 4]),
    ("To Do.2", [0, 0, 0, 0, 0, 0, 0]),
    ("In Progress.1", [0, 0, 0, 0, 0, 0, 0]),
    ("Done.2", [2, 2, 0, 0, 1, 1, 0]),
];

/// A small issue-tracker export with the usual mess: upper/lower case
/// duplicates, `.N` suffixed repeats and patch-level versions.
pub fn sample_table() -> RawTable {
    let headers: Vec<String> = std::iter::once("Version")
        .chain(SAMPLE_COLUMNS.iter().map(|(label, _)| *label))
        .map(str::to_string)
        .collect();

    let rows: Vec<Vec<Cell>> = SAMPLE_VERSIONS
        .iter()
        .enumerate()
        .map(|(i, version)| {
            std::iter::once(Cell::Text(version.to_string()))
                .chain(SAMPLE_COLUMNS.iter().map(|(_, values)| Cell::Int(values[i])))
                .collect::<Vec<Cell>>()
        })
        .collect();

    RawTable::new(headers, rows)
}
