//! Version label normalization.
//!
//! Every function passes a missing label (`None`) through untouched and never
//! fails: odd input either survives as-is or is cut lexically.

/// Lowercase, trim, and drop one leading `v`: `" V1.17 "` → `"1.17"`.
pub fn normalize(value: Option<&str>) -> Option<String> {
    let v = value?.trim().to_lowercase();
    match v.strip_prefix('v') {
        Some(rest) => Some(rest.to_string()),
        None => Some(v),
    }
}

/// Keep the first two `.`-separated segments: `"1.17.2"` → `"1.17"`.
/// Labels without a `.` are returned unchanged. Segments are not parsed.
pub fn truncate_to_major_minor(value: Option<&str>) -> Option<String> {
    let v = value?;
    let mut parts = v.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) => Some(format!("{}.{}", major, minor)),
        _ => Some(v.to_string()),
    }
}

/// Prepend `v` unless the label already starts with one.
pub fn add_prefix(value: Option<&str>) -> Option<String> {
    let v = value?;
    if v.starts_with('v') {
        Some(v.to_string())
    } else {
        Some(format!("v{}", v))
    }
}

/// Label used as the grouping key when versions are merged.
pub fn canonical_key(value: Option<&str>, merge_minor_versions: bool) -> Option<String> {
    let normalized = normalize(value);
    if merge_minor_versions {
        truncate_to_major_minor(normalized.as_deref())
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_one_prefix() {
        assert_eq!(normalize(Some(" V1.17 ")).as_deref(), Some("1.17"));
        assert_eq!(normalize(Some("vv2")).as_deref(), Some("v2"));
        assert_eq!(normalize(Some("Release-3")).as_deref(), Some("release-3"));
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn truncation_is_lexical() {
        assert_eq!(truncate_to_major_minor(Some("1.17.2")).as_deref(), Some("1.17"));
        assert_eq!(truncate_to_major_minor(Some("1.17")).as_deref(), Some("1.17"));
        assert_eq!(truncate_to_major_minor(Some("2")).as_deref(), Some("2"));
        assert_eq!(truncate_to_major_minor(Some("a.b.c")).as_deref(), Some("a.b"));
        assert_eq!(truncate_to_major_minor(Some("1..3")).as_deref(), Some("1."));
        assert_eq!(truncate_to_major_minor(None), None);
    }

    #[test]
    fn prefixing_is_idempotent() {
        for raw in ["1.2", "v1.2", "", "beta", "vNext", "V9"] {
            let once = add_prefix(Some(raw));
            assert_eq!(add_prefix(once.as_deref()), once, "input {:?}", raw);
        }
        assert_eq!(add_prefix(Some("1.2")).as_deref(), Some("v1.2"));
        // case-sensitive: an upper-case V is not a prefix
        assert_eq!(add_prefix(Some("V9")).as_deref(), Some("vV9"));
        assert_eq!(add_prefix(None), None);
    }

    #[test]
    fn canonical_key_honors_minor_flag() {
        assert_eq!(canonical_key(Some("V1.17.5"), true).as_deref(), Some("1.17"));
        assert_eq!(canonical_key(Some("V1.17.5"), false).as_deref(), Some("1.17.5"));
        assert_eq!(canonical_key(None, true), None);
    }
}
