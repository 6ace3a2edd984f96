use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::pipeline::sanitize::{present, ColumnSanitizer};
use crate::types::Column;

static ALPHA_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\p{L}+\b").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Suffix kept on street numbers
const BIS: &str = "bis";

/// Keeps numeric, hyphenated and "bis" street numbers; drops stray words
pub struct AddressNumberSanitizer;

impl AddressNumberSanitizer {
    fn rewrite(value: &str) -> Option<String> {
        if value == "-" {
            return None;
        }

        let joined = if value.contains('-') {
            value.split('-').map(str::trim).collect::<Vec<_>>().join("-")
        } else {
            value.to_string()
        };

        let words_removed = ALPHA_WORD.replace_all(&joined, |caps: &Captures| {
            let word = &caps[0];
            if word.eq_ignore_ascii_case(BIS) {
                word.to_string()
            } else {
                String::new()
            }
        });

        let collapsed = WHITESPACE.replace_all(&words_removed, " ");
        let cleaned = collapsed.trim_matches(|c: char| c == '-' || c.is_whitespace());

        (!cleaned.is_empty()).then(|| cleaned.to_string())
    }
}

impl ColumnSanitizer for AddressNumberSanitizer {
    fn column(&self) -> Column {
        Column::AddressNumber
    }

    fn name(&self) -> &str {
        "address_number"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        present(value).and_then(Self::rewrite)
    }
}
