use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::pipeline::sanitize::{capitalize_first, present, ColumnSanitizer};
use crate::types::Column;

/// Grammatical particles that stay lower-case after a street type,
/// as `(street type, particle)` pairs.
pub const PARTICLE_RULES: &[(&str, &str)] = &[("avenue", "du"), ("rue", "du"), ("rue", "de")];

static CITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:m|montpellier)\b").expect("valid regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static RUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bRue\b").expect("valid regex"));
static AFTER_STREET_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(avenue|rue) (\p{L})").expect("valid regex"));
static HYPHENATED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}+(?:-\p{L}+)+").expect("valid regex"));

static PARTICLES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    PARTICLE_RULES
        .iter()
        .map(|(street_type, particle)| {
            let pattern = format!(r"(?i)\b({}) ({})\b( \S)", street_type, particle);
            let rewrite = format!("${{1}} {}${{3}}", particle);
            (Regex::new(&pattern).expect("valid particle pattern"), rewrite)
        })
        .collect()
});

/// Cleans street names: drops city noise and numbers, fixes capitalisation
pub struct StreetNameSanitizer;

impl StreetNameSanitizer {
    fn rewrite(value: &str) -> Option<String> {
        if value.chars().count() <= 1 {
            return None;
        }

        let without_city = CITY_TOKEN.replace_all(value, "");
        let without_digits = DIGITS.replace_all(&without_city, "");
        let collapsed = WHITESPACE.replace_all(without_digits.trim(), " ");
        let lowered = RUE.replace_all(&collapsed, "rue");

        let capitalized = AFTER_STREET_TYPE.replace_all(&lowered, |caps: &Captures| {
            format!("{} {}", &caps[1], caps[2].to_uppercase())
        });

        let mut street = capitalized.into_owned();
        for (pattern, rewrite) in PARTICLES.iter() {
            street = pattern.replace_all(&street, rewrite.as_str()).into_owned();
        }

        if street.contains("rue") {
            street = HYPHENATED_WORD
                .replace_all(&street, |caps: &Captures| {
                    caps[0].split('-').map(capitalize_first).collect::<Vec<_>>().join("-")
                })
                .into_owned();
        }

        let street = street.trim();
        (!street.is_empty()).then(|| street.to_string())
    }
}

impl ColumnSanitizer for StreetNameSanitizer {
    fn column(&self) -> Column {
        Column::StreetName
    }

    fn name(&self) -> &str {
        "street_name"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        present(value).and_then(Self::rewrite)
    }
}
