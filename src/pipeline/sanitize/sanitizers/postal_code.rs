use crate::pipeline::sanitize::{present, ColumnSanitizer};
use crate::types::Column;

/// Placeholder the export uses for an unknown postal code
const UNKNOWN_POSTAL_CODE: &str = "0";

/// Treats the zero placeholder as missing; other codes pass through unchanged
pub struct PostalCodeSanitizer;

impl ColumnSanitizer for PostalCodeSanitizer {
    fn column(&self) -> Column {
        Column::PostalCode
    }

    fn name(&self) -> &str {
        "postal_code"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        match present(value)? {
            UNKNOWN_POSTAL_CODE => None,
            _ => value.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_missing() {
        assert_eq!(PostalCodeSanitizer.sanitize(Some("0")), None);
        assert_eq!(PostalCodeSanitizer.sanitize(Some(" 0 ")), None);
    }

    #[test]
    fn test_other_codes_pass_through() {
        assert_eq!(PostalCodeSanitizer.sanitize(Some("34000")).as_deref(), Some("34000"));
        assert_eq!(PostalCodeSanitizer.sanitize(Some("34070")).as_deref(), Some("34070"));
        assert_eq!(PostalCodeSanitizer.sanitize(None), None);
    }

    #[test]
    fn test_idempotent() {
        for raw in [Some("0"), Some("34080"), None] {
            let once = PostalCodeSanitizer.sanitize(raw);
            assert_eq!(PostalCodeSanitizer.sanitize(once.as_deref()), once);
        }
    }
}
