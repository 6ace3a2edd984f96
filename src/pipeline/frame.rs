use tracing::{info, instrument};

use crate::types::{CleanRecord, Record, Table};

/// Join the address parts into one line.
///
/// Returns `None` without a street: a number, postal code and city alone do
/// not locate anything.
pub fn build_address(
    number: Option<&str>,
    street: Option<&str>,
    postal_code: Option<&str>,
    city: Option<&str>,
) -> Option<String> {
    let street = street.map(str::trim).filter(|s| !s.is_empty())?;

    let address = [number, Some(street), postal_code, city]
        .iter()
        .map(|part| part.unwrap_or(""))
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    Some(address)
}

/// Derive the composite address and drop the columns it was built from.
pub fn frame_record(record: Record) -> CleanRecord {
    let address = build_address(
        record.address_number.as_deref(),
        record.street_name.as_deref(),
        record.postal_code.as_deref(),
        record.city_name.as_deref(),
    );

    CleanRecord {
        name: record.name,
        address,
        latitude: record.latitude,
        longitude: record.longitude,
        phone: record.phone,
        maintenance_frequency: record.maintenance_frequency,
        last_maintenance_date: record.last_maintenance_date,
    }
}

#[instrument(skip(table), fields(rows = table.len()))]
pub fn frame_data(table: Table<Record>) -> Table<CleanRecord> {
    let framed = table.map_rows(frame_record);
    let with_address = framed.iter().filter(|r| r.address.is_some()).count();
    info!(with_address, "Framed registry data");
    framed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        assert_eq!(
            build_address(Some("12"), Some("rue de la Loge"), Some("34000"), Some("Montpellier"))
                .as_deref(),
            Some("12 rue de la Loge 34000 Montpellier")
        );
    }

    #[test]
    fn test_missing_parts_are_skipped() {
        assert_eq!(
            build_address(None, Some("rue Foch"), None, Some("Montpellier")).as_deref(),
            Some("rue Foch Montpellier")
        );
        assert_eq!(
            build_address(Some(" 3 "), Some("rue  Foch "), None, None).as_deref(),
            Some("3 rue Foch")
        );
    }

    #[test]
    fn test_no_street_no_address() {
        assert_eq!(build_address(Some("12"), None, Some("34000"), Some("Montpellier")), None);
        assert_eq!(build_address(Some("12"), Some(" "), Some("34000"), Some("Montpellier")), None);
    }

    #[test]
    fn test_frame_record_keeps_other_fields() {
        let record = Record {
            id: Some("4".into()),
            name: Some("Piscine".into()),
            latitude: Some(43.6),
            longitude: Some(3.9),
            address_number: Some("1".into()),
            street_name: Some("rue Foch".into()),
            phone: Some("+33 6 12 34 56 78".into()),
            ..Default::default()
        };

        let clean = frame_record(record);

        assert_eq!(clean.name.as_deref(), Some("Piscine"));
        assert_eq!(clean.address.as_deref(), Some("1 rue Foch"));
        assert_eq!(clean.latitude, Some(43.6));
        assert_eq!(clean.phone.as_deref(), Some("+33 6 12 34 56 78"));
    }
}
