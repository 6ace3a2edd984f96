use crate::constants::CITY_NAME;
use crate::pipeline::sanitize::{present, ColumnSanitizer};
use crate::types::Column;

/// The registry covers one municipality: any present city becomes its name
pub struct CityNameSanitizer;

impl ColumnSanitizer for CityNameSanitizer {
    fn column(&self) -> Column {
        Column::CityName
    }

    fn name(&self) -> &str {
        "city_name"
    }

    fn sanitize(&self, value: Option<&str>) -> Option<String> {
        present(value).map(|_| CITY_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_values_become_montpellier() {
        for raw in ["MONTPELLIER", "Montpellier Cedex 2", "34000", "Montpellier"] {
            assert_eq!(CityNameSanitizer.sanitize(Some(raw)).as_deref(), Some("Montpellier"));
        }
    }

    #[test]
    fn test_missing_stays_missing() {
        assert_eq!(CityNameSanitizer.sanitize(None), None);
        assert_eq!(CityNameSanitizer.sanitize(Some(" ")), None);
    }
}
