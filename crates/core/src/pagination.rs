//! Pagination defaults and clamping helpers.
//!
//! Lives in `core` (zero internal deps) so both the repository layer and
//! any future tooling share the same limits.

/// Default number of rows per page.
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_LIMIT: i64 = 100;

/// Clamp an optional limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an optional offset to `>= 0`.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-5), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(5000), DEFAULT_LIMIT, MAX_LIMIT), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(50), DEFAULT_LIMIT, MAX_LIMIT), 50);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
