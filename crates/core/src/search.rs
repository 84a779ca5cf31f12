//! Search and pagination helpers shared by the repository layer.
//!
//! All list endpoints filter with case-insensitive substring matching
//! (`ILIKE`) over a fixed field set per entity; these helpers keep pattern
//! escaping and limit clamping in one place.

/// Default number of results per page for catalog listings.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum number of results per page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Default page size for notification listings.
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Escape `%`, `_`, and `\` in a user term and wrap it for substring ILIKE.
///
/// The output is safe to bind as an ILIKE pattern: the user's text matches
/// literally, anywhere in the field.
pub fn ilike_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_applies_default_and_bounds() {
        assert_eq!(clamp_limit(None, 100, 100), 100);
        assert_eq!(clamp_limit(Some(0), 100, 100), 1);
        assert_eq!(clamp_limit(Some(500), 100, 100), 100);
        assert_eq!(clamp_limit(Some(25), 100, 100), 25);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn ilike_pattern_wraps_and_escapes() {
        assert_eq!(ilike_pattern("pipe"), "%pipe%");
        assert_eq!(ilike_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(ilike_pattern("back\\slash"), "%back\\\\slash%");
    }
}
