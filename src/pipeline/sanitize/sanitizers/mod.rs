// Column-scoped rules, one per sanitized column
pub mod address_number;
pub mod city_name;
pub mod maintenance_frequency;
pub mod phone;
pub mod postal_code;
pub mod street_name;

pub use address_number::AddressNumberSanitizer;
pub use city_name::CityNameSanitizer;
pub use maintenance_frequency::MaintenanceFrequencySanitizer;
pub use phone::PhoneSanitizer;
pub use postal_code::PostalCodeSanitizer;
pub use street_name::StreetNameSanitizer;
