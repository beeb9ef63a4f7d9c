use std::collections::HashSet;

/// A single cell of an export, as inferred by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Text rendering of a present cell; `None` for `Missing`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column labels in file order. The first one names the version column.
    /// Labels are unique; see [`disambiguate_headers`].
    pub headers: Vec<String>,
    /// Each data row, padded or cut to `headers.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    /// Labels of every column after the version column.
    pub fn status_headers(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }

    /// The version column, one entry per row. Missing cells map to `None`.
    pub fn version_column(&self) -> Vec<Option<String>> {
        self.rows
            .iter()
            .map(|row| row.first().and_then(Cell::as_text))
            .collect()
    }

    /// Tab-separated header plus the first `limit` rows, for terminal output.
    pub fn preview(&self, limit: usize) -> String {
        let mut out = self.headers.join("\t");
        for row in self.rows.iter().take(limit) {
            let cells: Vec<String> = row
                .iter()
                .map(|c| c.as_text().unwrap_or_default())
                .collect();
            out.push('\n');
            out.push_str(&cells.join("\t"));
        }
        out
    }

    /// Cell at (`row`, `col`), `Missing` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static MISSING: Cell = Cell::Missing;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&MISSING)
    }
}

/// Make repeated labels unique by appending `.1`, `.2`, … in order of
/// appearance: `["Done", "Done"]` becomes `["Done", "Done.1"]`.
/// A suffix already used by a literal label is skipped.
pub fn disambiguate_headers<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let labels: Vec<String> = labels.into_iter().map(|s| s.as_ref().to_string()).collect();
    let mut taken: HashSet<String> = labels.iter().cloned().collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(labels.len());

    for label in &labels {
        if seen.insert(label.as_str()) {
            out.push(label.clone());
            continue;
        }
        let mut n = 1;
        let unique = loop {
            let candidate = format!("{}.{}", label, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(unique.clone());
        out.push(unique);
    }

    out
}
