pub mod write;

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

pub use write::{write_table, OutputFormat};

/// `<input stem>_streamlined_<YYYYMMDD_HHMMSS>.csv`, in the working directory.
pub fn default_output_path(input: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".into());
    PathBuf::from(format!(
        "{}_streamlined_{}.csv",
        stem,
        now.format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_output_is_named_after_input() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 30)
            .unwrap();
        assert_eq!(
            default_output_path(Path::new("/data/jira export.csv"), now),
            PathBuf::from("jira export_streamlined_20240309_070530.csv")
        );
    }
}
