/// Header key used to locate the required columns.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_ascii_lowercase()
}

pub(crate) fn clean_company(value: &str) -> String {
    value.trim().to_string()
}

/// Empty or whitespace-only descriptions count as missing.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
