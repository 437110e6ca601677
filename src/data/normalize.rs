// ---------------------------------------------------------------------------
// Field normalizer – raw cell → canonical string or number
// ---------------------------------------------------------------------------
//
// Pure functions over a single raw cell. Failure is a sentinel (placeholder
// string or `None`), never an error: a malformed cell must not abort an
// aggregation pass.

/// Placeholder labels substituted for missing/blank string fields.
pub const UNKNOWN_INSIDER: &str = "Unknown Insider";
pub const UNKNOWN_ISSUER: &str = "Unknown Issuer";
pub const UNKNOWN: &str = "Unknown";

/// Normalize a free-text field: trim whitespace, substitute the view's
/// placeholder when the cell is absent or blank.
pub fn clean_string(raw: Option<&str>, placeholder: &str) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Normalize a code-like field (Transaction Code, Ownership Type): trim and
/// ASCII-uppercase, with the same placeholder rule as [`clean_string`].
pub fn clean_code(raw: Option<&str>, placeholder: &str) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_ascii_uppercase(),
        _ => placeholder.to_string(),
    }
}

/// Parse a numeric cell with locale-free decimal parsing. Absent, blank or
/// non-numeric cells yield `None`; callers decide per view whether that
/// means "treat as zero" or "exclude the record".
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_string_trims_and_substitutes() {
        assert_eq!(clean_string(Some("  Jane Doe "), UNKNOWN_INSIDER), "Jane Doe");
        assert_eq!(clean_string(Some("   "), UNKNOWN_INSIDER), "Unknown Insider");
        assert_eq!(clean_string(Some(""), UNKNOWN_ISSUER), "Unknown Issuer");
        assert_eq!(clean_string(None, UNKNOWN), "Unknown");
    }

    #[test]
    fn clean_code_uppercases() {
        assert_eq!(clean_code(Some(" p "), UNKNOWN), "P");
        assert_eq!(clean_code(Some("direct"), UNKNOWN), "DIRECT");
        assert_eq!(clean_code(None, UNKNOWN), "Unknown");
    }

    #[test]
    fn parse_number_accepts_plain_decimals() {
        assert_eq!(parse_number(Some("500")), Some(500.0));
        assert_eq!(parse_number(Some(" 12.75 ")), Some(12.75));
        assert_eq!(parse_number(Some("-3")), Some(-3.0));
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("  ")), None);
        assert_eq!(parse_number(None), None);
        // Thousands separators are not locale-parsed; they fail outright.
        assert_eq!(parse_number(Some("1,000")), None);
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(Some("NaN")), None);
    }
}
