//! Shared helpers for the tab-delimited legacy exports.
//!
//! The format is as plain as it gets: UTF-8, newline rows, single-tab field
//! separator, no quoting or escaping (a literal tab inside a field is not
//! representable). Parsing stays manual and dependency-light; the files are
//! small and the column rules are positional.

/// Splits file content into data rows: leading/trailing blank lines are
/// dropped and a trailing `\r` (CRLF exports) is stripped per row.
#[must_use]
pub fn rows(content: &str) -> Vec<&str> {
    content
        .trim()
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Splits a row on tab characters. No trimming; column rules decide that.
#[must_use]
pub fn fields(row: &str) -> Vec<&str> {
    row.split('\t').collect()
}

/// Trimmed, non-empty field at `idx`, if any.
#[must_use]
pub fn field<'a>(parts: &[&'a str], idx: usize) -> Option<&'a str> {
    parts
        .get(idx)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Returns `true` when the first line carries the given header token, in
/// which case parsing starts at line 1 instead of line 0.
#[must_use]
pub fn has_header(first_line: &str, token: &str) -> bool {
    first_line.contains(token)
}

/// Strips leading zeros from a SKU. An all-zero SKU becomes empty and is
/// then dropped by the missing-join-key rule.
#[must_use]
pub fn strip_leading_zeros(sku: &str) -> &str {
    sku.trim_start_matches('0')
}

/// Loose integer coercion for numeric columns: plain integers parse
/// directly, decimal text is truncated toward zero, anything else (or a
/// non-finite value) is `None` so the caller can apply its default.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_i64_loose(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_trims_blank_edges_and_crlf() {
        let content = "\nA\t1\r\nB\t2\n\n";
        assert_eq!(rows(content), vec!["A\t1", "B\t2"]);
    }

    #[test]
    fn field_returns_trimmed_non_empty_values() {
        let parts = fields("  89997002 \t\tX");
        assert_eq!(field(&parts, 0), Some("89997002"));
        assert_eq!(field(&parts, 1), None);
        assert_eq!(field(&parts, 2), Some("X"));
        assert_eq!(field(&parts, 3), None);
    }

    #[test]
    fn header_detection_is_a_token_check_on_the_first_line() {
        assert!(has_header("DP_DESCRIP\tDP_VALOFER", "DP_DESCRIP"));
        assert!(!has_header("PARACETAMOL\t1499", "DP_DESCRIP"));
    }

    #[test]
    fn strip_leading_zeros_handles_all_zero_skus() {
        assert_eq!(strip_leading_zeros("0089997002"), "89997002");
        assert_eq!(strip_leading_zeros("89997002"), "89997002");
        assert_eq!(strip_leading_zeros("0000"), "");
    }

    #[test]
    fn parse_i64_loose_accepts_integers_and_truncates_decimals() {
        assert_eq!(parse_i64_loose("14990"), Some(14_990));
        assert_eq!(parse_i64_loose(" 14990.7 "), Some(14_990));
        assert_eq!(parse_i64_loose("-5"), Some(-5));
    }

    #[test]
    fn parse_i64_loose_rejects_garbage() {
        assert_eq!(parse_i64_loose(""), None);
        assert_eq!(parse_i64_loose("precio"), None);
        assert_eq!(parse_i64_loose("NaN"), None);
        assert_eq!(parse_i64_loose("inf"), None);
    }
}
