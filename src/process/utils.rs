use crate::process::raw_table::Cell;
use std::path::Path;

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Markers that stand for an empty cell in spreadsheet and dataframe exports.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None",
];

/// True for blank text or one of the missing markers (any case).
pub fn is_missing_marker(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || MISSING_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(s))
}

/// 2) Infer a count-column cell from raw CSV text.
///
/// Blank or missing marker → `Missing`, integer → `Int`, finite float →
/// `Float`, anything else (including "inf") → `Text`.
pub fn infer_cell(raw: &str) -> Cell {
    let cleaned = clean_str(raw);
    if is_missing_marker(&cleaned) {
        Cell::Missing
    } else if let Ok(i) = cleaned.parse::<i64>() {
        Cell::Int(i)
    } else if let Some(f) = cleaned.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Cell::Float(f)
    } else {
        Cell::Text(cleaned)
    }
}

/// 3) Version cells stay textual so "1.10" is never read back as "1.1".
/// The field is kept verbatim; normalization is left to the pipeline.
pub fn infer_version_cell(raw: &str) -> Cell {
    if is_missing_marker(raw) {
        Cell::Missing
    } else {
        Cell::Text(raw.to_string())
    }
}

/// True when `path` ends in `.csv`, ignoring case.
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}

/// Render a float count the way the exports do: always with a decimal part.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
