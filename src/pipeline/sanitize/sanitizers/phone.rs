use once_cell::sync::Lazy;
use regex::Regex;

use crate::pipeline::sanitize::{present, ColumnSanitizer};
use crate::types::Column;

/// Accepted input shapes (after the leading `+` is stripped) and their rewrite
/// into international form. First match wins.
static PHONE_SHAPES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // 06 12 34 56 78
        (r"^0(6) (\d{2}) (\d{2}) (\d{2}) (\d{2})$", "+33${1} ${2} ${3} ${4} ${5}"),
        // 336 12 34 56 78
        (r"^(\d{3}) (\d{2}) (\d{2}) (\d{2}) (\d{2})$", "+${1} ${2} ${3} ${4} ${5}"),
        // 33 6 12 34 56 78
        (r"^(\d{2}) (\d) (\d{2}) (\d{2}) (\d{2}) (\d{2})$", "+${1} ${2} ${3} ${4} ${5} ${6}"),
    ]
    .into_iter()
    .map(|(pattern, rewrite)| (Regex::new(pattern).expect("valid phone pattern"), rewrite))
    .collect()
});

static MULTIPLE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid regex"));
static COUNTRY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+33(\S)").expect("valid regex"));
static CANONICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+33 \d \d{2} \d{2} \d{2} \d{2}$").expect("valid regex"));

/// Normalizes phone numbers to `+33 D DD DD DD DD`
pub struct PhoneSanitizer;

impl PhoneSanitizer {
    fn rewrite(value: &str) -> Option<String> {
        let stripped = value.trim_start_matches('+');
        let collapsed = MULTIPLE_SPACES.replace_all(stripped, " ");

        let rewritten = PHONE_SHAPES
            .iter()
            .find(|(pattern, _)| pattern.is_match(&collapsed))
            .map(|(pattern, rewrite)| pattern.replace(&collapsed, *rewrite).into_owned())?;

        let spaced = COUNTRY_CODE.replace(&rewritten, "+33 ${1}").into_owned();

        // A foreign prefix can match the three-digit shape; only French numbers are kept
        CANONICAL.is_match(&spaced).then_some(spaced)
    }
}

impl ColumnSanitizer for PhoneSanitizer {
    fn column(&self) -> Column {
        Column::Phone
    }

    fn name(&self) -> &str {
        "phone"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        present(value).and_then(Self::rewrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(value: &str) -> Option<String> {
        PhoneSanitizer.sanitize(Some(value))
    }

    #[test]
    fn test_mobile_number_gets_country_code() {
        assert_eq!(sanitize("06 12 34 56 78").as_deref(), Some("+33 6 12 34 56 78"));
    }

    #[test]
    fn test_double_spaces_are_collapsed() {
        assert_eq!(sanitize("06  12 34  56 78").as_deref(), Some("+33 6 12 34 56 78"));
    }

    #[test]
    fn test_three_digit_prefix() {
        assert_eq!(sanitize("336 12 34 56 78").as_deref(), Some("+33 6 12 34 56 78"));
        assert_eq!(sanitize("+336 12 34 56 78").as_deref(), Some("+33 6 12 34 56 78"));
        assert_eq!(sanitize("334 67 12 34 56").as_deref(), Some("+33 4 67 12 34 56"));
    }

    #[test]
    fn test_canonical_form_passes_through() {
        assert_eq!(sanitize("+33 6 12 34 56 78").as_deref(), Some("+33 6 12 34 56 78"));
    }

    #[test]
    fn test_unrecognized_shapes_are_missing() {
        assert_eq!(sanitize("abc"), None);
        assert_eq!(sanitize("0612345678"), None);
        assert_eq!(sanitize("06.12.34.56.78"), None);
        assert_eq!(sanitize("04 67 34 70 00"), None);
        assert_eq!(sanitize("441 23 45 67 89"), None);
        assert_eq!(PhoneSanitizer.sanitize(None), None);
        assert_eq!(PhoneSanitizer.sanitize(Some("  ")), None);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["06 12 34 56 78", "336 98 76 54 32", "+33 7 11 22 33 44"] {
            let once = sanitize(raw);
            let twice = PhoneSanitizer.sanitize(once.as_deref());
            assert_eq!(once, twice, "not a fixed point for {}", raw);
        }
    }
}
