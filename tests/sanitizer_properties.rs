use dae_registry::pipeline::sanitize::sanitizers::{
    CityNameSanitizer, PhoneSanitizer, PostalCodeSanitizer,
};
use dae_registry::pipeline::{frame_data, ColumnSanitizer, SanitizerRegistry};
use dae_registry::{Record, Table};

fn mobile_numbers() -> Vec<String> {
    (0..100u32)
        .map(|i| {
            let digits = format!("{:08}", i * 1_234_567 % 100_000_000);
            format!(
                "06 {} {} {} {}",
                &digits[0..2],
                &digits[2..4],
                &digits[4..6],
                &digits[6..8]
            )
        })
        .collect()
}

#[test]
fn every_mobile_number_maps_to_international_form() {
    for raw in mobile_numbers() {
        let expected = format!("+33 6{}", &raw[2..]);
        assert_eq!(PhoneSanitizer.sanitize(Some(raw.as_str())), Some(expected));
    }
}

#[test]
fn unrecognized_phones_are_missing() {
    for raw in ["abc", "06", "06 12 34 56", "+1 555 123 4567", "06-12-34-56-78", "0033612345678"] {
        assert_eq!(PhoneSanitizer.sanitize(Some(raw)), None, "accepted {}", raw);
    }
}

#[test]
fn present_cities_become_montpellier() {
    for raw in ["Montpellier", "MONTPELLIER", "Castelnau-le-Lez", "x"] {
        assert_eq!(CityNameSanitizer.sanitize(Some(raw)).as_deref(), Some("Montpellier"));
    }
    assert_eq!(CityNameSanitizer.sanitize(None), None);
}

#[test]
fn postal_code_zero_only_is_missing() {
    assert_eq!(PostalCodeSanitizer.sanitize(Some("0")), None);
    for raw in ["34000", "34070", "34090", "00"] {
        assert_eq!(PostalCodeSanitizer.sanitize(Some(raw)).as_deref(), Some(raw));
    }
}

#[test]
fn sanitizing_twice_changes_nothing() {
    let rows = vec![
        Record {
            phone: Some("06 98 76 54 32".into()),
            city_name: Some("montpellier".into()),
            postal_code: Some("0".into()),
            address_number: Some("4 - 6".into()),
            street_name: Some("12 Rue du faubourg saint-jaumes".into()),
            maintenance_frequency: Some("Tout les 2 ans".into()),
            ..Default::default()
        },
        Record {
            phone: Some("336 98 76 54 32".into()),
            city_name: None,
            postal_code: Some("34000".into()),
            street_name: Some("avenue de toulouse".into()),
            ..Default::default()
        },
    ];

    let registry = SanitizerRegistry::new();
    let mut once = Table::new(rows);
    registry.apply(&mut once);
    let mut twice = once.clone();
    registry.apply(&mut twice);

    assert_eq!(once, twice);
}

#[test]
fn address_requires_a_street() {
    let table = Table::new(vec![
        Record {
            address_number: Some("12".into()),
            street_name: Some("rue de la Loge".into()),
            postal_code: Some("34000".into()),
            city_name: Some("Montpellier".into()),
            ..Default::default()
        },
        Record {
            address_number: Some("12".into()),
            postal_code: Some("34000".into()),
            city_name: Some("Montpellier".into()),
            ..Default::default()
        },
    ]);

    let framed = frame_data(table);

    assert_eq!(
        framed.rows()[0].address.as_deref(),
        Some("12 rue de la Loge 34000 Montpellier")
    );
    assert_eq!(framed.rows()[1].address, None);
}
